//! Mover domain: joystick-driven rigid body
//!
//! Содержит:
//! - Joystick (input source resource, пишет host)
//! - Mover (компонент персонажа, requires Velocity/RigidBody)
//! - apply_joystick_movement (FixedUpdate)
//! - HeadlessPhysicsPlugin (velocity → Transform без rapier backend)

use bevy::prelude::*;

pub mod components;
pub mod systems;

#[cfg(test)]
mod systems_tests;

pub use components::*;
pub use systems::*;

/// Mover Plugin
///
/// Регистрирует Joystick resource и систему движения в FixedUpdate
/// (ДО rapier physics step).
pub struct MoverPlugin;

impl Plugin for MoverPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier3d::plugin::PhysicsSet;

        app.init_resource::<Joystick>()
            .register_type::<Mover>()
            .add_systems(
                FixedUpdate,
                apply_joystick_movement.before(PhysicsSet::SyncBackend),
            );
    }
}

/// Прямая интеграция velocity → position для headless запуска
///
/// Подключать только когда RapierPhysicsPlugin НЕ подключен (иначе двойная интеграция).
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            integrate_velocity_headless.after(apply_joystick_movement),
        );
    }
}
