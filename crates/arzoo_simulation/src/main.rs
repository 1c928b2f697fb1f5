//! Headless симуляция ARZOO
//!
//! Скриптованный маркер + джойстик без рендера и AR subsystem:
//! маркер появляется, дрожит, получает первый update; персонаж ходит по кругу.

use arzoo_simulation::{
    create_headless_app, log_error, log_info, mover::spawn_mover, set_log_level,
    tracking::spawn_tracked_spawner, validate_wiring, HeadlessPhysicsPlugin, Joystick, LogLevel,
    MoverConfig, SpawnedPrefab, SpawnerConfig, TrackableId, TrackedImage, TrackedImagesChanged,
    TrackedSpawner,
};
use bevy::prelude::*;

fn main() {
    let mover_config = MoverConfig::default();
    let spawner_config = SpawnerConfig::default();

    for result in [mover_config.validate(), spawner_config.validate()] {
        if let Err(err) = result {
            log_error(&format!("invalid config: {}", err));
            std::process::exit(1);
        }
    }

    // --verbose: показывать debug логи spawner'а
    if std::env::args().any(|arg| arg == "--verbose") {
        set_log_level(LogLevel::Debug);
    }

    let mut app = create_headless_app();
    app.add_plugins(HeadlessPhysicsPlugin);

    if let Err(err) = validate_wiring(app.world()) {
        log_error(&format!("{}", err));
        std::process::exit(1);
    }

    let spawned = {
        let mut commands = app.world_mut().commands();
        spawn_mover(&mut commands, Vec3::ZERO, &mover_config).map(|character| {
            spawn_tracked_spawner(&mut commands, TrackedSpawner::new(spawner_config));
            let anchor = commands
                .spawn((Name::new("Marker"), Transform::from_xyz(1.0, 0.0, 2.0)))
                .id();
            (character, anchor)
        })
    };
    app.world_mut().flush();

    let (character, anchor) = match spawned {
        Ok(entities) => entities,
        Err(err) => {
            log_error(&format!("failed to spawn character: {}", err));
            std::process::exit(1);
        }
    };

    let image = TrackedImage::new(TrackableId(1), anchor);
    log_info("Starting ARZOO headless simulation");

    // Запускаем 600 тиков симуляции
    for tick in 0..600u32 {
        let angle = tick as f32 * 0.02;
        app.world_mut()
            .resource_mut::<Joystick>()
            .set(angle.sin(), angle.cos());

        match tick {
            10 => {
                app.world_mut().send_event(TrackedImagesChanged::added([image]));
            }
            20 => {
                if let Some(mut pose) = app.world_mut().get_mut::<Transform>(anchor) {
                    pose.translation.z += 0.01;
                }
                app.world_mut().send_event(TrackedImagesChanged::updated([image]));
            }
            _ => {}
        }

        app.update();

        if tick % 100 == 0 {
            let position = app
                .world()
                .get::<Transform>(character)
                .map(|t| t.translation)
                .unwrap_or_default();
            let prefabs = app
                .world_mut()
                .query::<&SpawnedPrefab>()
                .iter(app.world())
                .count();
            log_info(&format!(
                "Tick {}: character at {:?}, {} prefabs",
                tick, position, prefabs
            ));
        }
    }

    log_info("Simulation complete!");
}
