//! ARZOO Simulation Core
//!
//! ECS-логика AR сцены на Bevy 0.16:
//! - mover: joystick → rigid body velocity + heading
//! - tracking: префабы над tracked images (spawn под anchor, one-shot detach)
//!
//! HOST ARCHITECTURE:
//! - ECS = gameplay state (Joystick, Spawn Set, attachment state)
//! - Host = rendering, AR tracking, physics backend (RapierPhysicsPlugin)

use bevy::prelude::*;

// Публичные модули
pub mod config;
pub mod logger;
pub mod mover;
pub mod tracking;

pub use config::{ConfigError, MoverConfig, SpawnTemplate, SpawnerConfig};
pub use logger::*;
pub use mover::{HeadlessPhysicsPlugin, Joystick, Mover, MoverPlugin};
pub use tracking::{
    AttachmentState, SpawnSet, SpawnedObject, SpawnedPrefab, TrackableId, TrackedImage,
    TrackedImagesChanged, TrackedSpawner, TrackedSpawnerPlugin,
};

/// Fixed timestep (Hz) для физики mover'а
pub const FIXED_HZ: f64 = 50.0;

/// Главный plugin симуляции (объединяет подсистемы)
///
/// Компоненты независимы: mover не знает про tracking и наоборот.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .add_plugins((MoverPlugin, TrackedSpawnerPlugin));
    }
}

/// Проверка wiring'а перед активацией (input source + tracking event bus)
///
/// Ошибка фатальна: чинится конфигурацией app, не в runtime.
pub fn validate_wiring(world: &World) -> Result<(), ConfigError> {
    if !world.contains_resource::<Joystick>() {
        return Err(ConfigError::MissingDependency("Joystick resource (add MoverPlugin)"));
    }

    if !world.contains_resource::<Events<TrackedImagesChanged>>() {
        return Err(ConfigError::MissingDependency(
            "TrackedImagesChanged event (add TrackedSpawnerPlugin)",
        ));
    }

    Ok(())
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Physics backend не подключен: для движения добавь `HeadlessPhysicsPlugin`.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin);

    app
}
