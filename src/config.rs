//! Tunable thresholds for swing map construction and analysis.
//!
//! Every field has a default, so a config file only has to name what it
//! overrides:
//!
//! ```toml
//! slider_precision_ms = 70.0
//!
//! [parity]
//! strategy = "grid_avoidance"
//!
//! [analysis]
//! bucket_seconds = 5.0
//! ```

use crate::error::ConfigError;
use crate::parity::ParityStrategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceMapConfig {
    /// Notes closer than this (ms) can merge into one swing.
    pub slider_precision_ms: f32,
    /// Seconds after the last wall before the player returns to centre.
    pub undodge_seconds: f32,
    /// How far past its last note a swing ends, in beats.
    pub swing_tail_beats: f32,
    pub parity: ParityConfig,
    pub analysis: AnalysisConfig,
}

impl Default for SliceMapConfig {
    fn default() -> Self {
        Self {
            slider_precision_ms: 59.0,
            undodge_seconds: 0.35,
            swing_tail_beats: 0.1,
            parity: ParityConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl SliceMapConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{:?}: {}", path, e)))?;
        let config = Self::from_toml_str(&content).inspect_err(|e| {
            log::error!("CONFIG: Failed to parse {:?}: {}", path, e);
        })?;
        log::info!(
            "CONFIG: Loaded {:?} (strategy: {:?})",
            path,
            config.parity.strategy
        );
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: ParityStrategy) -> Self {
        self.parity.strategy = strategy;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityConfig {
    pub strategy: ParityStrategy,
    /// Rounding step for angle -> direction lookups, in degrees.
    pub angle_interval: f32,
    /// Rotation beyond which alternating is abandoned for a reset.
    pub rotation_reset_limit: f32,
    /// Max angle change that still holds parity for a bomb after a forehand.
    pub forehand_bomb_tolerance: f32,
    /// Same, after a backhand.
    pub backhand_bomb_tolerance: f32,
    /// Bombs within this many beats of each other form one grid.
    pub bomb_time_snap: f32,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            strategy: ParityStrategy::default(),
            angle_interval: 45.0,
            rotation_reset_limit: 180.0,
            forehand_bomb_tolerance: 90.0,
            backhand_bomb_tolerance: 45.0,
            bomb_time_snap: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Width of one analysis bucket, in seconds.
    pub bucket_seconds: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bucket_seconds: 10.0,
        }
    }
}
