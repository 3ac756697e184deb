//! Runtime configuration for the correction pipeline.
//!
//! Values come from defaults, an optional JSON file, and `DALTONIC_*`
//! environment variables, in that order of precedence (environment wins).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::redistribution::DEFAULT_STRENGTH;
use crate::correction::mode::CorrectionMode;
use crate::error::{DaltonError, Result};
use crate::regions::policy::DEFAULT_SKIP_FRAMES;

/// Environment variable overriding [`CorrectionConfig::skip_frames`].
pub const ENV_SKIP_FRAMES: &str = "DALTONIC_SKIP_FRAMES";
/// Environment variable overriding [`CorrectionConfig::redistribution_strength`].
pub const ENV_STRENGTH: &str = "DALTONIC_STRENGTH";
/// Environment variable overriding [`CorrectionConfig::initial_mode`].
pub const ENV_MODE: &str = "DALTONIC_MODE";

/// Tunable parameters of the correction core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    /// Detection refresh period in frames. Must be at least 1.
    pub skip_frames: u64,
    /// Cross-channel weight of the error-shift matrices. Default: 0.7.
    pub redistribution_strength: f64,
    /// Mode the controller starts in.
    pub initial_mode: CorrectionMode,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            skip_frames: DEFAULT_SKIP_FRAMES,
            redistribution_strength: DEFAULT_STRENGTH,
            initial_mode: CorrectionMode::Off,
        }
    }
}

impl CorrectionConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        let config = config.with_env_overrides();
        config.validate()?;
        tracing::info!("Loaded correction config from {}", path.display());
        Ok(config)
    }

    /// Apply `DALTONIC_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Values that fail to parse are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_SKIP_FRAMES) {
            match v.trim().parse() {
                Ok(n) => self.skip_frames = n,
                Err(_) => tracing::warn!("Ignoring {}={:?}: not an integer", ENV_SKIP_FRAMES, v),
            }
        }
        if let Some(v) = lookup(ENV_STRENGTH) {
            match v.trim().parse() {
                Ok(s) => self.redistribution_strength = s,
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", ENV_STRENGTH, v),
            }
        }
        if let Some(v) = lookup(ENV_MODE) {
            match v.parse() {
                Ok(mode) => self.initial_mode = mode,
                Err(_) => tracing::warn!("Ignoring {}={:?}: unknown mode", ENV_MODE, v),
            }
        }
        self
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.skip_frames == 0 {
            return Err(DaltonError::InvalidConfig(
                "skip_frames must be at least 1".to_string(),
            ));
        }
        if !self.redistribution_strength.is_finite() || self.redistribution_strength < 0.0 {
            return Err(DaltonError::InvalidConfig(format!(
                "redistribution_strength must be a finite non-negative number, got {}",
                self.redistribution_strength
            )));
        }
        Ok(())
    }

    /// Pretty-printed JSON, suitable for writing a starter config file.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
