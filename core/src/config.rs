//! Playback configuration
//!
//! Every tunable of the playback engine, loadable from TOML. Missing keys
//! take their defaults, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Playback tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Dwell at each end of the replay before looping, in seconds (default: 1.0)
    #[serde(default = "default_pause_time")]
    pub pause_time: f64,
    /// Length of the sync window in seconds (default: 4.0)
    #[serde(default = "default_sync_sample_range")]
    pub sync_sample_range: f64,
    /// Ticks re-sampled into the sync window after a skip (default: 32)
    #[serde(default = "default_sync_seed_ticks")]
    pub sync_seed_ticks: i32,
    /// Initial signed playback rate (default: 1.0)
    #[serde(default = "default_playback_rate")]
    pub playback_rate: f64,
    /// Start playing as soon as a replay is attached (default: true)
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// Rates stepped through by rate up/down controls, ascending
    #[serde(default = "default_rate_presets")]
    pub rate_presets: Vec<f64>,
}

fn default_pause_time() -> f64 {
    1.0
}
fn default_sync_sample_range() -> f64 {
    4.0
}
fn default_sync_seed_ticks() -> i32 {
    32
}
fn default_playback_rate() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}
fn default_rate_presets() -> Vec<f64> {
    vec![-5.0, -1.0, 0.1, 0.25, 1.0, 2.0, 5.0, 10.0]
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            pause_time: default_pause_time(),
            sync_sample_range: default_sync_sample_range(),
            sync_seed_ticks: default_sync_seed_ticks(),
            playback_rate: default_playback_rate(),
            autoplay: default_true(),
            rate_presets: default_rate_presets(),
        }
    }
}

impl PlaybackConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check that every value is usable by the playback engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pause_time.is_finite() || self.pause_time < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pause_time must be a non-negative number of seconds, got {}",
                self.pause_time
            )));
        }
        if !self.sync_sample_range.is_finite() || self.sync_sample_range <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sync_sample_range must be positive, got {}",
                self.sync_sample_range
            )));
        }
        if self.sync_seed_ticks < 0 {
            return Err(ConfigError::Invalid(format!(
                "sync_seed_ticks must not be negative, got {}",
                self.sync_seed_ticks
            )));
        }
        if !self.playback_rate.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "playback_rate must be finite, got {}",
                self.playback_rate
            )));
        }
        if self.rate_presets.is_empty() {
            return Err(ConfigError::Invalid("rate_presets must not be empty".into()));
        }
        if self.rate_presets.iter().any(|rate| !rate.is_finite()) {
            return Err(ConfigError::Invalid(
                "rate_presets must only contain finite rates".into(),
            ));
        }
        if self.rate_presets.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::Invalid(
                "rate_presets must be strictly ascending".into(),
            ));
        }
        Ok(())
    }
}
