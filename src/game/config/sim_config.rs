//! Simulation Configuration
//!
//! One JSON-loadable aggregate of every tunable in the simulation. Every
//! field is optional in the file; missing fields take the values from
//! `Default`, which match the built-in constants of each component.

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::CameraFollowConfig;
use crate::game::systems::GroundSnapConfig;
use crate::game::terrain::TerrainChunkConfig;
use crate::player::CharacterConfig;
use crate::world::{HeightFieldParams, SpaceMode};

/// Errors from loading or validating a [`SimConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON deserialization error.
    Json(serde_json::Error),
    /// A value parsed but is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub mode: SpaceMode,
    pub height_field: HeightFieldParams,
    pub character: CharacterConfig,
    pub camera: CameraFollowConfig,
    pub ground_snap: GroundSnapConfig,
    pub terrain: TerrainChunkConfig,
    /// Seconds between terrain registry rebuilds
    pub registry_refresh_interval: f32,
    /// Where the character starts (y is replaced by the ground height)
    pub spawn: Vec3,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: SpaceMode::Outdoor,
            height_field: HeightFieldParams::default(),
            character: CharacterConfig::default(),
            camera: CameraFollowConfig::default(),
            ground_snap: GroundSnapConfig::default(),
            terrain: TerrainChunkConfig::default(),
            registry_refresh_interval: 0.2,
            spawn: Vec3::new(4.0, 0.0, -6.0),
        }
    }
}

impl SimConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON of every value, defaults included.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value a component would misbehave on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        fn unit_interval(name: &str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be in (0, 1], got {value}")))
            }
        }

        let c = &self.character;
        positive("character.angular_rate", c.angular_rate)?;
        positive("character.outdoor_speed", c.outdoor_speed)?;
        positive("character.indoor_speed", c.indoor_speed)?;
        positive("character.run_multiplier", c.run_multiplier)?;
        positive("character.base_jump_force", c.base_jump_force)?;
        positive("character.gravity", c.gravity)?;
        positive("character.max_snap_delta", c.max_snap_delta)?;
        positive("character.bounds.outdoor_extent", c.bounds.outdoor_extent)?;
        positive("character.bounds.indoor_extent", c.bounds.indoor_extent)?;
        if !(c.jump_cooldown.is_finite() && c.jump_cooldown >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "character.jump_cooldown must be non-negative, got {}",
                c.jump_cooldown
            )));
        }

        for (name, profile) in [("outdoor", &self.camera.outdoor), ("indoor", &self.camera.indoor)] {
            unit_interval(&format!("camera.{name}.moving_lerp"), profile.moving_lerp)?;
            unit_interval(&format!("camera.{name}.idle_lerp"), profile.idle_lerp)?;
            unit_interval(&format!("camera.{name}.moving_decay"), profile.moving_decay)?;
            if let Some(clamp) = profile.clamp {
                positive(&format!("camera.{name}.clamp.max_distance"), clamp.max_distance)?;
                if clamp.min_height > clamp.max_height {
                    return Err(ConfigError::Invalid(format!(
                        "camera.{name}.clamp height band is empty ({} > {})",
                        clamp.min_height, clamp.max_height
                    )));
                }
            }
        }
        unit_interval("camera.idle_decay", self.camera.idle_decay)?;

        positive("ground_snap.sweep_interval", self.ground_snap.sweep_interval)?;
        unit_interval("ground_snap.character_smoothing", self.ground_snap.character_smoothing)?;
        positive("ground_snap.cache_threshold", self.ground_snap.cache_threshold)?;
        if self.ground_snap.prop_recompute_every == 0 {
            return Err(ConfigError::Invalid(
                "ground_snap.prop_recompute_every must be at least 1".to_string(),
            ));
        }

        positive("terrain.chunk_size", self.terrain.chunk_size)?;
        positive("terrain.extent", self.terrain.extent)?;
        if self.terrain.resolution == 0 {
            return Err(ConfigError::Invalid("terrain.resolution must be at least 1".to_string()));
        }

        positive("registry_refresh_interval", self.registry_refresh_interval)?;

        if !self.spawn.is_finite() {
            return Err(ConfigError::Invalid("spawn must be finite".to_string()));
        }

        Ok(())
    }
}
