//! Tracking events: батчи изменений от AR subsystem
//!
//! Host отправляет через `world.send_event` один батч на frame,
//! позы anchor'ов обновляет сам (Transform anchor entity).

use bevy::prelude::*;

use super::components::TrackableId;

/// Запись о tracked image: identity + anchor entity с живой позой
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedImage {
    pub id: TrackableId,
    /// Anchor entity, Transform которого host держит равным world позе маркера
    ///
    /// Должен быть root entity (без `ChildOf`): local `Transform` читается как world поза.
    /// Для anchor'а под XR origin placement сдвинется на позу parent'а (логируется warning).
    pub anchor: Entity,
}

impl TrackedImage {
    pub fn new(id: TrackableId, anchor: Entity) -> Self {
        Self { id, anchor }
    }
}

/// Event: tracked images changed (батч за frame)
///
/// Обрабатывается `process_tracked_images` в порядке доставки:
/// `added` → спавн префабов под anchor, затем `updated` → one-shot detach.
/// Пустые батчи пропускаются.
///
/// `removed` пока никто не слушает: заспавненные объекты остаются на месте.
#[derive(Event, Debug, Clone, Default)]
pub struct TrackedImagesChanged {
    pub added: Vec<TrackedImage>,
    pub updated: Vec<TrackedImage>,
    pub removed: Vec<TrackableId>,
}

impl TrackedImagesChanged {
    pub fn added(images: impl IntoIterator<Item = TrackedImage>) -> Self {
        Self {
            added: images.into_iter().collect(),
            ..default()
        }
    }

    pub fn updated(images: impl IntoIterator<Item = TrackedImage>) -> Self {
        Self {
            updated: images.into_iter().collect(),
            ..default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}
