//! Tests for mover systems.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use bevy::prelude::*;
    use bevy_rapier3d::prelude::Velocity;

    use crate::config::{ConfigError, MoverConfig};
    use crate::mover::{spawn_mover, Joystick, Mover, MoverPlugin};

    fn mover_app() -> App {
        let mut app = App::new();
        app.add_plugins(MoverPlugin);
        app
    }

    fn tick(app: &mut App, horizontal: f32, vertical: f32) {
        app.world_mut().resource_mut::<Joystick>().set(horizontal, vertical);
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn yaw_degrees(app: &mut App, entity: Entity) -> f32 {
        let transform = app.world().get::<Transform>(entity).expect("transform");
        transform.rotation.to_euler(EulerRot::YXZ).0.to_degrees()
    }

    #[test]
    fn test_required_components_present() {
        let mut app = mover_app();
        let entity = app.world_mut().spawn(Mover::new(1.0).unwrap()).id();

        assert!(app.world().get::<Velocity>(entity).is_some());
        assert!(app.world().get::<Transform>(entity).is_some());
    }

    #[test]
    fn test_velocity_matches_axes_times_speed() {
        let mut app = mover_app();
        let entity = app.world_mut().spawn(Mover::new(3.0).unwrap()).id();

        let samples = [(-1.0, -1.0), (-0.5, 0.25), (0.0, 1.0), (1.0, 0.0), (0.75, -0.3), (0.0, 0.0)];
        for (h, v) in samples {
            tick(&mut app, h, v);

            let velocity = app.world().get::<Velocity>(entity).expect("velocity");
            assert_eq!(velocity.linvel, Vec3::new(h * 3.0, 0.0, v * 3.0), "axes = ({}, {})", h, v);
        }
    }

    #[test]
    fn test_diagonal_input_sets_yaw() {
        let mut app = mover_app();
        let entity = app.world_mut().spawn(Mover::new(2.0).unwrap()).id();

        tick(&mut app, 1.0, 1.0);
        assert_relative_eq!(yaw_degrees(&mut app, entity), 45.0, epsilon = 1e-3);

        tick(&mut app, -0.3, 0.3);
        assert_relative_eq!(yaw_degrees(&mut app, entity), -45.0, epsilon = 1e-3);

        let mover = app.world().get::<Mover>(entity).expect("mover");
        assert_relative_eq!(mover.heading_degrees.unwrap(), -45.0, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_axis_keeps_last_heading() {
        let mut app = mover_app();
        let entity = app.world_mut().spawn(Mover::new(2.0).unwrap()).id();

        tick(&mut app, 1.0, -1.0);
        let heading = yaw_degrees(&mut app, entity);
        assert_relative_eq!(heading, 135.0, epsilon = 1e-3);

        // Движение строго по одной оси: velocity меняется, yaw нет
        tick(&mut app, 0.0, 1.0);
        assert_relative_eq!(yaw_degrees(&mut app, entity), heading, epsilon = 1e-3);

        tick(&mut app, 1.0, 0.0);
        assert_relative_eq!(yaw_degrees(&mut app, entity), heading, epsilon = 1e-3);

        tick(&mut app, 0.0, 0.0);
        assert_relative_eq!(yaw_degrees(&mut app, entity), heading, epsilon = 1e-3);

        let velocity = app.world().get::<Velocity>(entity).expect("velocity");
        assert_eq!(velocity.linvel, Vec3::ZERO);
    }

    #[test]
    fn test_yaw_update_preserves_pitch_and_roll() {
        let mut app = mover_app();
        let tilted = Transform::from_rotation(Quat::from_euler(EulerRot::YXZ, 0.0, 0.2, 0.05));
        let entity = app.world_mut().spawn((Mover::new(2.0).unwrap(), tilted)).id();

        tick(&mut app, 0.5, 0.5);

        let transform = app.world().get::<Transform>(entity).expect("transform");
        let (yaw, pitch, roll) = transform.rotation.to_euler(EulerRot::YXZ);
        assert_relative_eq!(yaw.to_degrees(), 45.0, epsilon = 1e-3);
        assert_relative_eq!(pitch, 0.2, epsilon = 1e-4);
        assert_relative_eq!(roll, 0.05, epsilon = 1e-4);
    }

    #[test]
    fn test_angular_velocity_untouched() {
        let mut app = mover_app();
        let entity = app
            .world_mut()
            .spawn((
                Mover::new(2.0).unwrap(),
                Velocity {
                    linvel: Vec3::ZERO,
                    angvel: Vec3::new(0.0, 1.5, 0.0),
                },
            ))
            .id();

        tick(&mut app, 1.0, 1.0);

        let velocity = app.world().get::<Velocity>(entity).expect("velocity");
        assert_eq!(velocity.angvel, Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn test_spawn_mover_uses_config_speed() {
        let mut app = mover_app();
        let entity = {
            let mut commands = app.world_mut().commands();
            spawn_mover(&mut commands, Vec3::new(0.0, 0.0, 1.0), &MoverConfig { speed: 4.0 })
                .expect("valid config")
        };
        app.world_mut().flush();

        tick(&mut app, 0.5, 0.0);

        let velocity = app.world().get::<Velocity>(entity).expect("velocity");
        assert_eq!(velocity.linvel, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_spawn_mover_rejects_invalid_speed() {
        let mut app = mover_app();

        for speed in [0.0, -2.0, f32::NAN] {
            let result = {
                let mut commands = app.world_mut().commands();
                spawn_mover(&mut commands, Vec3::ZERO, &MoverConfig { speed })
            };
            assert!(matches!(result, Err(ConfigError::NonPositiveSpeed(_))), "speed {} accepted", speed);
        }
        app.world_mut().flush();

        let mut movers = app.world_mut().query::<&Mover>();
        assert_eq!(movers.iter(app.world()).count(), 0);
    }
}
