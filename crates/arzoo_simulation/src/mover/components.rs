//! Mover компоненты: on-screen джойстик и joystick-driven персонаж

use bevy::prelude::*;
use bevy_rapier3d::prelude::{RigidBody, Velocity};

use crate::config::{ConfigError, MoverConfig};

/// Состояние on-screen джойстика (input source)
///
/// Host пишет оси каждый frame, `apply_joystick_movement` поллит их в FixedUpdate.
/// Обе оси всегда в диапазоне [-1, 1].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Joystick {
    horizontal: f32,
    vertical: f32,
}

impl Joystick {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        let mut joystick = Self::default();
        joystick.set(horizontal, vertical);
        joystick
    }

    /// Записать оси (clamp в [-1, 1], NaN/inf → 0)
    pub fn set(&mut self, horizontal: f32, vertical: f32) {
        self.horizontal = sanitize_axis(horizontal);
        self.vertical = sanitize_axis(vertical);
    }

    pub fn release(&mut self) {
        self.horizontal = 0.0;
        self.vertical = 0.0;
    }

    pub fn horizontal(&self) -> f32 {
        self.horizontal
    }

    pub fn vertical(&self) -> f32 {
        self.vertical
    }
}

fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Joystick-driven персонаж
///
/// Required components гарантируют rigid-body sink (`Velocity` + `RigidBody`):
/// entity с `Mover` без них не бывает.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Transform, Velocity, RigidBody)]
pub struct Mover {
    /// Скорость (м/с) при полностью отклонённом джойстике
    pub speed: f32,
    /// Последний применённый heading (градусы), `None` до первого диагонального input
    pub heading_degrees: Option<f32>,
}

impl Default for Mover {
    fn default() -> Self {
        Self {
            speed: MoverConfig::default().speed,
            heading_degrees: None,
        }
    }
}

impl Mover {
    /// Mover с заданной скоростью; 0, отрицательная или NaN скорость → `NonPositiveSpeed`
    pub fn new(speed: f32) -> Result<Self, ConfigError> {
        Self::from_config(&MoverConfig { speed })
    }

    pub fn from_config(config: &MoverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            speed: config.speed,
            heading_degrees: None,
        })
    }
}
