//! Runtime configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// How per-frame vectors are reduced to a window average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AveragingMode {
    /// Mean of the per-frame magnitudes
    #[default]
    Magnitude,
    /// Magnitude of the mean vector
    Vector,
}

/// Motion classifier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SamplerConfig {
    /// Number of frames in the averaging window
    pub history: usize,
    /// Average palm speed above which the hand is moving (mm/s)
    pub moving_velocity: f32,
    /// Average per-frame palm translation above which the hand is moving (mm)
    pub moving_turn: f32,
    pub averaging: AveragingMode,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            history: 10,
            moving_velocity: 25.0,
            moving_turn: 0.3,
            averaging: AveragingMode::Magnitude,
        }
    }
}

/// Frame delivery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceConfig {
    /// Frames kept by the controller for look-back
    pub history_capacity: usize,
    /// Delay between replayed frames
    pub frame_interval_ms: u64,
    /// Restart the recording when it runs out
    pub loop_playback: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            history_capacity: crate::device::history::DEFAULT_HISTORY_CAPACITY,
            frame_interval_ms: 10,
            loop_playback: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub device: DeviceConfig,
    pub sampler: SamplerConfig,
}

impl Config {
    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sampler = &self.sampler;
        if sampler.history == 0 {
            return Err(ConfigError::Invalid("sampler.history must be at least 1".to_string()));
        }
        if sampler.history > self.device.history_capacity {
            return Err(ConfigError::Invalid(format!(
                "sampler.history ({}) exceeds device.historyCapacity ({})",
                sampler.history, self.device.history_capacity
            )));
        }
        for (name, value) in [
            ("movingVelocity", sampler.moving_velocity),
            ("movingTurn", sampler.moving_turn),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sampler.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sampler.history, 10);
        assert_eq!(config.sampler.moving_velocity, 25.0);
        assert_eq!(config.sampler.moving_turn, 0.3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"sampler": {"movingVelocity": 40, "averaging": "vector"}}"#)
                .unwrap();

        assert_eq!(config.sampler.moving_velocity, 40.0);
        assert_eq!(config.sampler.averaging, AveragingMode::Vector);
        assert_eq!(config.sampler.history, 10);
        assert_eq!(config.device.frame_interval_ms, 10);
    }

    #[test]
    fn test_rejects_empty_window() {
        let mut config = Config::default();
        config.sampler.history = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_window_larger_than_history() {
        let mut config = Config::default();
        config.device.history_capacity = 5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let mut config = Config::default();
        config.sampler.moving_turn = -1.0;
        assert!(config.validate().is_err());

        config.sampler.moving_turn = f32::NAN;
        assert!(config.validate().is_err());
    }
}
