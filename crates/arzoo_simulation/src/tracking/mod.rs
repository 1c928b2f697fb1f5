//! Tracking domain: префабы над tracked images
//!
//! AR subsystem (host) владеет трекингом и позами anchor'ов.
//! ECS ответственность:
//! - Spawn Set (TrackableId → заспавненные префабы)
//! - spawn под anchor на `added`
//! - one-shot detach на первом `updated` (объекты замирают в первой стабильной позе)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;


pub use components::*;
pub use events::*;
pub use systems::*;

/// TrackedSpawner Plugin
///
/// Одна система в Update: `process_tracked_images` (батчи по порядку, added → updated)
pub struct TrackedSpawnerPlugin;

impl Plugin for TrackedSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TrackedImagesChanged>()
            .register_type::<SpawnedPrefab>()
            .add_systems(Update, process_tracked_images);
    }
}
