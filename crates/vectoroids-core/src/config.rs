//! Simulation configuration and its validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::LEVEL_SAFE_RADIUS;
use crate::enums::RespawnPolicy;
use crate::types::WorldBounds;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Play field extent.
    pub bounds: WorldBounds,
    /// Respawn countdown behavior while paused.
    pub respawn_policy: RespawnPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bounds: WorldBounds::default(),
            respawn_policy: RespawnPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Validate the configuration. An invalid configuration is a
    /// programming error and fatal at engine construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bounds.width.is_finite() && self.bounds.width > 0.0)
            || !(self.bounds.height.is_finite() && self.bounds.height > 0.0)
        {
            return Err(ConfigError::InvalidBounds {
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        // The safety radius must leave somewhere to spawn asteroids.
        let max_half = self.bounds.half_width().max(self.bounds.half_height());
        if LEVEL_SAFE_RADIUS >= max_half {
            return Err(ConfigError::BoundsTooSmall {
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        Ok(())
    }
}

/// Fatal configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world bounds must be finite and positive, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
    #[error("world bounds {width}x{height} leave no room outside the spawn safety radius")]
    BoundsTooSmall { width: f64, height: f64 },
}
