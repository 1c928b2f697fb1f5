//! Scene authoring config: скорость mover'а и шаблоны префабов для трекинга
//!
//! Задаётся один раз при сборке сцены (RON файл или `Default`), в runtime не меняется.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки конфигурации и wiring'а (фатальны при активации)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("movement speed must be a positive finite number, got {0}")]
    NonPositiveSpeed(f32),

    #[error("spawner has no prefab templates")]
    EmptyTemplates,

    #[error("template '{0}' has a non-finite offset")]
    NonFiniteOffset(String),

    #[error("missing dependency: {0}")]
    MissingDependency(&'static str),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Параметры движения персонажа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoverConfig {
    /// Скорость (м/с) при полностью отклонённом джойстике
    pub speed: f32,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self { speed: 2.0 }
    }
}

impl MoverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.speed));
        }
        Ok(())
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

/// Один префаб, который появляется над tracked image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTemplate {
    /// Имя для `Name` компонента заспавненного entity
    pub name: String,
    /// Путь к prefab asset'у (визуал биндит host)
    pub prefab: String,
    /// World-space смещение от позиции anchor'а в момент спавна
    pub offset: [f32; 3],
}

impl SpawnTemplate {
    pub fn new(name: impl Into<String>, prefab: impl Into<String>, offset: Vec3) -> Self {
        Self {
            name: name.into(),
            prefab: prefab.into(),
            offset: offset.to_array(),
        }
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::from_array(self.offset)
    }
}

/// Набор префабов для каждого tracked image (порядок = порядок спавна)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    pub templates: Vec<SpawnTemplate>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            templates: vec![
                SpawnTemplate::new("Tiger", "prefabs/tiger.glb", Vec3::new(0.0, 0.0, 0.1)),
                SpawnTemplate::new("Horse", "prefabs/horse.glb", Vec3::new(0.2, 0.0, 0.0)),
                SpawnTemplate::new("Dog", "prefabs/dog.glb", Vec3::new(-0.2, 0.0, 0.0)),
            ],
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.templates.is_empty() {
            return Err(ConfigError::EmptyTemplates);
        }

        if let Some(bad) = self
            .templates
            .iter()
            .find(|t| !t.offset().is_finite())
        {
            return Err(ConfigError::NonFiniteOffset(bad.name.clone()));
        }

        Ok(())
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}
