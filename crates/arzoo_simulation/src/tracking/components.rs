//! TrackedSpawner компоненты: spawn set, attachment state, маркеры префабов

use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::SpawnerConfig;

/// Opaque identity маркера от AR subsystem (стабильна между update'ами)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct TrackableId(pub u64);

/// Привязан ли заспавненный объект к anchor'у
///
/// Attached → Detached ровно один раз, обратного перехода нет.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AttachmentState {
    /// ChildOf(anchor), следует за позой маркера
    Attached,
    /// World-fixed, заморожен в позе первого update'а
    Detached,
}

/// Handle заспавненного объекта + его attachment state
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct SpawnedObject {
    pub entity: Entity,
    /// Индекс шаблона в `SpawnerConfig::templates`
    pub template: usize,
    pub state: AttachmentState,
}

/// Spawn Set: TrackableId → заспавненные объекты (в порядке шаблонов)
///
/// Инварианты:
/// - максимум одна запись на identity
/// - длина записи не уменьшается, записи не удаляются
#[derive(Debug, Clone, Default)]
pub struct SpawnSet {
    entries: HashMap<TrackableId, Vec<SpawnedObject>>,
}

impl SpawnSet {
    pub fn contains(&self, id: TrackableId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: TrackableId) -> Option<&[SpawnedObject]> {
        self.entries.get(&id).map(Vec::as_slice)
    }

    pub(crate) fn get_mut(&mut self, id: TrackableId) -> Option<&mut Vec<SpawnedObject>> {
        self.entries.get_mut(&id)
    }

    /// Добавить объекты в запись identity (создаёт запись если её нет)
    pub(crate) fn append(&mut self, id: TrackableId, objects: impl IntoIterator<Item = SpawnedObject>) {
        self.entries.entry(id).or_default().extend(objects);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Компонент-поведение: спавнит префабы над tracked images
///
/// Живёт на scene entity. Включён пока entity существует и не `Disabled`;
/// spawn set принадлежит только этому компоненту.
#[derive(Component, Debug, Clone, Default)]
pub struct TrackedSpawner {
    pub config: SpawnerConfig,
    pub spawn_set: SpawnSet,
}

impl TrackedSpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            config,
            spawn_set: SpawnSet::default(),
        }
    }
}

/// Маркер на каждом заспавненном префабе (host биндит визуал по `prefab`)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpawnedPrefab {
    pub template: String,
    pub prefab: String,
    pub trackable: TrackableId,
}
