//! Construction-time game configuration
//!
//! Everything here is fixed once a session is built. Invalid values are
//! rejected up front by [`GameConfig::validate`] so the simulation never
//! starts with a broken catalog or nonsensical physics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::tier::TierCatalog;

/// Reasons a configuration can be refused
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tier catalog must contain at least one tier")]
    EmptyCatalog,
    #[error("tier {index} radius {radius} must be positive and finite")]
    InvalidRadius { index: usize, radius: f32 },
    #[error("tier {index} radius {radius} must be larger than the previous tier's {previous}")]
    RadiusNotIncreasing {
        index: usize,
        radius: f32,
        previous: f32,
    },
    #[error("tier {index} score value must be non-zero")]
    ZeroScore { index: usize },
    #[error("well dimensions {width}x{height} must be positive and finite")]
    InvalidWell { width: f32, height: f32 },
    #[error("gravity {0} must be finite")]
    InvalidGravity(f32),
    #[error("friction {0} must be in (0, 1)")]
    InvalidFriction(f32),
    #[error("restitution {0} must be in [0, 1]")]
    InvalidRestitution(f32),
    #[error("spawn tier count must be at least 1")]
    NoSpawnTiers,
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// The rectangular region pieces fall within (y grows downward, top at 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub width: f32,
    pub height: f32,
}

impl Default for Well {
    fn default() -> Self {
        Self {
            width: WELL_WIDTH,
            height: WELL_HEIGHT,
        }
    }
}

/// Per-tick physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Horizontal velocity damping, applied every tick and again on floor contact
    pub friction: f32,
    /// Fraction of velocity kept on bounces
    pub restitution: f32,
    /// Cosmetic spin per tick
    #[serde(default = "default_rotation_step")]
    pub rotation_step: f32,
}

fn default_rotation_step() -> f32 {
    ROTATION_STEP
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            restitution: RESTITUTION,
            rotation_step: ROTATION_STEP,
        }
    }
}

/// Spawner policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Vertical position new pieces appear at
    pub height: f32,
    /// Spawned pieces are drawn uniformly from this many lowest tiers
    pub tier_count: usize,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            height: SPAWN_HEIGHT,
            tier_count: SPAWN_TIER_COUNT,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub well: Well,
    #[serde(default)]
    pub physics: PhysicsParams,
    #[serde(default)]
    pub spawn: SpawnParams,
    #[serde(default)]
    pub catalog: TierCatalog,
    /// Distance below the floor after which stray pieces are discarded
    #[serde(default = "default_cleanup_margin")]
    pub cleanup_margin: f32,
}

fn default_cleanup_margin() -> f32 {
    CLEANUP_MARGIN
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            well: Well::default(),
            physics: PhysicsParams::default(),
            spawn: SpawnParams::default(),
            catalog: TierCatalog::default(),
            cleanup_margin: CLEANUP_MARGIN,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing sections take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;

        let Well { width, height } = self.well;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidWell { width, height });
        }

        let physics = &self.physics;
        if !physics.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(physics.gravity));
        }
        if !(physics.friction > 0.0 && physics.friction < 1.0) {
            return Err(ConfigError::InvalidFriction(physics.friction));
        }
        if !(0.0..=1.0).contains(&physics.restitution) {
            return Err(ConfigError::InvalidRestitution(physics.restitution));
        }

        if self.spawn.tier_count == 0 {
            return Err(ConfigError::NoSpawnTiers);
        }

        Ok(())
    }

    /// Number of tiers the spawner may actually pick from
    pub fn effective_spawn_tiers(&self) -> usize {
        self.spawn.tier_count.min(self.catalog.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_spawn_tiers(), 3);
        assert_eq!(config.well.width, 400.0);
        assert_eq!(config.well.height, 600.0);
    }

    #[test]
    fn test_validate_physics_ranges() {
        let mut config = GameConfig::default();
        config.physics.friction = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFriction(0.0)));

        // A friction of 1 would never bleed off horizontal speed
        let mut config = GameConfig::default();
        config.physics.friction = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFriction(1.0)));

        let mut config = GameConfig::default();
        config.physics.restitution = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRestitution(1.5)));

        let mut config = GameConfig::default();
        config.well.width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWell { .. })
        ));

        let mut config = GameConfig::default();
        config.spawn.tier_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoSpawnTiers));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let json = r#"{ "physics": { "gravity": 0.25, "friction": 0.9, "restitution": 0.5 } }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.physics.gravity, 0.25);
        assert_eq!(config.physics.rotation_step, ROTATION_STEP);
        assert_eq!(config.catalog, TierCatalog::fruits());
        assert_eq!(config.cleanup_margin, CLEANUP_MARGIN);
    }

    #[test]
    fn test_from_json_rejects_garbage_and_invalid_values() {
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            GameConfig::from_json(r#"{ "catalog": [] }"#),
            Err(ConfigError::EmptyCatalog)
        );
    }

    #[test]
    fn test_spawn_tiers_clamped_to_catalog() {
        let mut config = GameConfig::default();
        config.spawn.tier_count = 99;
        assert_eq!(config.effective_spawn_tiers(), 6);
    }
}
