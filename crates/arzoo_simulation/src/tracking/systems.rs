//! TrackedSpawner systems: spawn на `added`, one-shot detach на `updated`
//!
//! Батчи обрабатываются строго в порядке доставки, внутри батча: все `added`, затем все `updated`.
//! `[updated(A)], [added(A)]` в одном frame: update no-op, объекты A остаются Attached.
//!
//! Image, пришедший в `added` и `updated` одного батча, спавнится и сразу замораживается.
//! Commands этого прогона ещё не применены, поэтому local позы новых объектов берутся из `PendingSpawns`.

use bevy::ecs::entity_disabling::Disabled;
use bevy::prelude::*;
use std::collections::HashMap;

use super::components::{AttachmentState, SpawnedObject, SpawnedPrefab, TrackedSpawner};
use super::events::{TrackedImage, TrackedImagesChanged};
use crate::logger::{log, log_warning};

/// Transform + есть ли у entity parent
pub type PoseQuery<'w, 's> = Query<'w, 's, (&'static Transform, Has<ChildOf>)>;

/// Entity, заспавненные в текущем прогоне системы → их local Transform под anchor'ом
pub type PendingSpawns = HashMap<Entity, Transform>;

/// World поза префаба в момент спавна: позиция anchor'а + offset, ротация anchor'а
///
/// Offset world-space (не вращается вместе с anchor'ом).
pub fn spawn_placement(anchor: &Transform, offset: Vec3) -> Transform {
    Transform {
        translation: anchor.translation + offset,
        rotation: anchor.rotation,
        scale: Vec3::ONE,
    }
}

/// Поза anchor'а; `Transform` читается как world поза
///
/// Anchor с parent'ом: warning, поза всё равно local (placement сдвинется на позу parent'а).
fn anchor_pose(poses: &PoseQuery, image: TrackedImage) -> Option<Transform> {
    let (anchor, parented) = poses.get(image.anchor).ok()?;
    if parented {
        log_warning(&format!(
            "TrackedSpawner: anchor {:?} for {:?} has a parent, its local Transform is used as world pose",
            image.anchor, image.id
        ));
    }
    Some(*anchor)
}

/// Спавн префабов для нового tracked image
///
/// Возвращает `false` если image уже в spawn set (duplicate add) или anchor не найден.
pub fn on_added(
    commands: &mut Commands,
    spawner: &mut TrackedSpawner,
    image: TrackedImage,
    poses: &PoseQuery,
    pending: &mut PendingSpawns,
) -> bool {
    if spawner.spawn_set.contains(image.id) {
        log(&format!("TrackedSpawner: duplicate add for {:?}, ignored", image.id));
        return false;
    }

    let Some(anchor) = anchor_pose(poses, image) else {
        log_warning(&format!(
            "TrackedSpawner: anchor {:?} for {:?} has no Transform, skip spawn",
            image.anchor, image.id
        ));
        return false;
    };

    let anchor_global = GlobalTransform::from(anchor);

    let objects: Vec<SpawnedObject> = spawner
        .config
        .templates
        .iter()
        .enumerate()
        .map(|(index, template)| {
            let world = spawn_placement(&anchor, template.offset());
            // Local transform под anchor'ом, сохраняющий world позу
            let local = GlobalTransform::from(world).reparented_to(&anchor_global);

            let entity = commands
                .spawn((
                    Name::new(template.name.clone()),
                    SpawnedPrefab {
                        template: template.name.clone(),
                        prefab: template.prefab.clone(),
                        trackable: image.id,
                    },
                    local,
                    ChildOf(image.anchor),
                ))
                .id();
            pending.insert(entity, local);

            SpawnedObject {
                entity,
                template: index,
                state: AttachmentState::Attached,
            }
        })
        .collect();

    log(&format!(
        "TrackedSpawner: spawned {} prefabs for {:?}",
        objects.len(),
        image.id
    ));

    spawner.spawn_set.append(image.id, objects);
    true
}

/// One-shot detach: отвязать prefabs от anchor'а, заморозив текущую world позу
///
/// - image не в spawn set → no-op (update до spawn'а)
/// - entity уже despawned извне → пропускаем (stale handle)
/// - уже Detached → пропускаем
///
/// Возвращает число объектов, отвязанных этим вызовом.
pub fn on_updated(
    commands: &mut Commands,
    spawner: &mut TrackedSpawner,
    image: TrackedImage,
    poses: &PoseQuery,
    pending: &PendingSpawns,
) -> usize {
    let Some(objects) = spawner.spawn_set.get_mut(image.id) else {
        return 0;
    };

    let Some(anchor) = anchor_pose(poses, image) else {
        return 0;
    };

    let mut detached = 0;

    for object in objects.iter_mut() {
        if object.state == AttachmentState::Detached {
            continue;
        }

        let local = match poses.get(object.entity) {
            Ok((local, _)) => *local,
            Err(_) => match pending.get(&object.entity) {
                Some(local) => *local,
                None => {
                    log(&format!(
                        "TrackedSpawner: stale handle {:?} for {:?}, skip",
                        object.entity, image.id
                    ));
                    continue;
                }
            },
        };

        let world = anchor.mul_transform(local);

        commands
            .entity(object.entity)
            .remove::<ChildOf>()
            .insert(world);

        object.state = AttachmentState::Detached;
        detached += 1;
    }

    if detached > 0 {
        log(&format!("TrackedSpawner: detached {} prefabs for {:?}", detached, image.id));
    }

    detached
}

/// Один батч: все `added`, затем все `updated`
pub fn apply_batch(
    commands: &mut Commands,
    spawner: &mut TrackedSpawner,
    batch: &TrackedImagesChanged,
    poses: &PoseQuery,
    pending: &mut PendingSpawns,
) {
    for image in &batch.added {
        on_added(commands, spawner, *image, poses, pending);
    }
    for image in &batch.updated {
        on_updated(commands, spawner, *image, poses, pending);
    }
}

/// Система: батчи frame'а в порядке доставки → каждый включённый spawner
///
/// Events читаются всегда: пока spawner'ов нет (или все Disabled) батчи дропаются,
/// после включения старые батчи не переигрываются.
pub fn process_tracked_images(
    mut commands: Commands,
    mut events: EventReader<TrackedImagesChanged>,
    mut spawners: Query<&mut TrackedSpawner>,
    poses: PoseQuery,
) {
    let batches: Vec<&TrackedImagesChanged> = events.read().filter(|batch| !batch.is_empty()).collect();
    if batches.is_empty() {
        return;
    }

    let mut pending = PendingSpawns::new();
    for mut spawner in spawners.iter_mut() {
        for batch in &batches {
            apply_batch(&mut commands, &mut spawner, batch, &poses, &mut pending);
        }
    }
}

/// Включить/выключить spawner (subscribe/unsubscribe)
///
/// Выключенный spawner (`Disabled`) не виден default query filter'ам,
/// поэтому батчи до него не доходят. Despawn entity = гарантированный unsubscribe.
pub fn set_spawner_enabled(commands: &mut Commands, spawner: Entity, enabled: bool) {
    if enabled {
        commands.entity(spawner).remove::<Disabled>();
    } else {
        commands.entity(spawner).insert(Disabled);
    }

    log(&format!(
        "TrackedSpawner {:?}: {}",
        spawner,
        if enabled { "subscribed" } else { "unsubscribed" }
    ));
}

/// Spawn helper для spawner entity
pub fn spawn_tracked_spawner(commands: &mut Commands, spawner: TrackedSpawner) -> Entity {
    commands
        .spawn((Name::new("TrackedSpawner"), spawner))
        .id()
}
