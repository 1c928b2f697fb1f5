//! Joystick → rigid body velocity
//!
//! Архитектура:
//! - Каждый fixed tick: linvel = (h, 0, v) * speed
//! - Диагональный input (обе оси != 0) поворачивает персонажа по yaw
//! - Интеграцию позиции делает физика host'а (rapier), либо `HeadlessPhysicsPlugin`

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Joystick, Mover};
use crate::config::{ConfigError, MoverConfig};

/// Planar velocity из осей джойстика (Y всегда 0)
pub fn planar_velocity(horizontal: f32, vertical: f32, speed: f32) -> Vec3 {
    Vec3::new(horizontal, 0.0, vertical) * speed
}

/// Heading в градусах, `None` если хотя бы одна ось ровно 0
///
/// 0° = +Z, 90° = +X (поворот вокруг +Y переводит +Z в (sin, 0, cos)).
pub fn heading_degrees(horizontal: f32, vertical: f32) -> Option<f32> {
    if horizontal != 0.0 && vertical != 0.0 {
        Some(horizontal.atan2(vertical).to_degrees())
    } else {
        None
    }
}

/// Заменить yaw, сохранив pitch/roll
pub fn with_yaw(rotation: Quat, yaw_degrees: f32) -> Quat {
    let (_, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_euler(EulerRot::YXZ, yaw_degrees.to_radians(), pitch, roll)
}

/// Система: джойстик → linvel + heading
///
/// Работает в FixedUpdate. Angular velocity не трогаем.
pub fn apply_joystick_movement(
    joystick: Res<Joystick>,
    mut query: Query<(&mut Mover, &mut Velocity, &mut Transform)>,
) {
    let h = joystick.horizontal();
    let v = joystick.vertical();
    let heading = heading_degrees(h, v);

    for (mut mover, mut velocity, mut transform) in query.iter_mut() {
        velocity.linvel = planar_velocity(h, v, mover.speed);

        // На оси == 0 heading не пересчитываем: остаётся последний
        if let Some(yaw) = heading {
            transform.rotation = with_yaw(transform.rotation, yaw);
            mover.heading_degrees = Some(yaw);
        }
    }
}

/// Система интеграции velocity → Transform (headless режим, без Rapier backend)
///
/// position += linvel * dt
pub fn integrate_velocity_headless(
    mut query: Query<(&Velocity, &mut Transform), With<Mover>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (velocity, mut transform) in query.iter_mut() {
        transform.translation += velocity.linvel * delta;
    }
}

/// Spawn helper для joystick персонажа
///
/// Создает entity с полным набором компонентов:
/// - Transform
/// - Mover (speed из config)
/// - Rapier: dynamic RigidBody + Collider (capsule) + Velocity
/// - LockedAxes: физика не валит персонажа, yaw пишет only `apply_joystick_movement`
///
/// Невалидный config → `Err`, entity не создаётся.
pub fn spawn_mover(
    commands: &mut Commands,
    position: Vec3,
    config: &MoverConfig,
) -> Result<Entity, ConfigError> {
    let mover = Mover::from_config(config)?;

    Ok(commands
        .spawn((
            Name::new("Mover"),
            Transform::from_translation(position),
            mover,
            RigidBody::Dynamic,
            Collider::capsule_y(0.25, 0.2),
            Velocity::default(),
            LockedAxes::ROTATION_LOCKED,
        ))
        .id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_planar_velocity_scales_axes() {
        let velocity = planar_velocity(0.5, -1.0, 4.0);
        assert_eq!(velocity, Vec3::new(2.0, 0.0, -4.0));
    }

    #[test]
    fn test_planar_velocity_at_rest() {
        assert_eq!(planar_velocity(0.0, 0.0, 3.0), Vec3::ZERO);
    }

    #[test]
    fn test_heading_diagonals() {
        assert_relative_eq!(heading_degrees(1.0, 1.0).unwrap(), 45.0, epsilon = 1e-4);
        assert_relative_eq!(heading_degrees(-1.0, 1.0).unwrap(), -45.0, epsilon = 1e-4);
        assert_relative_eq!(heading_degrees(1.0, -1.0).unwrap(), 135.0, epsilon = 1e-4);
        assert_relative_eq!(heading_degrees(-0.5, -0.5).unwrap(), -135.0, epsilon = 1e-4);
    }

    #[test]
    fn test_heading_suppressed_on_zero_axis() {
        assert_eq!(heading_degrees(0.0, 1.0), None);
        assert_eq!(heading_degrees(1.0, 0.0), None);
        assert_eq!(heading_degrees(0.0, 0.0), None);
    }

    #[test]
    fn test_heading_faces_input_direction() {
        let (h, v) = (0.6, 0.8);
        let rotation = with_yaw(Quat::IDENTITY, heading_degrees(h, v).unwrap());
        let forward = rotation * Vec3::Z;

        assert!(forward.abs_diff_eq(Vec3::new(h, 0.0, v), 1e-5), "forward = {:?}", forward);
    }

    #[test]
    fn test_with_yaw_keeps_pitch_and_roll() {
        let original = Quat::from_euler(EulerRot::YXZ, 0.2, 0.3, -0.1);
        let rotated = with_yaw(original, 90.0);
        let (yaw, pitch, roll) = rotated.to_euler(EulerRot::YXZ);

        assert_relative_eq!(yaw, 90f32.to_radians(), epsilon = 1e-4);
        assert_relative_eq!(pitch, 0.3, epsilon = 1e-4);
        assert_relative_eq!(roll, -0.1, epsilon = 1e-4);
    }
}
