//! Boundary configuration: advisory thresholds and input clipping bounds.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ahp::CONSISTENCY_THRESHOLD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML config: {0}")]
    Toml(String),
    #[error("failed to parse JSON config: {0}")]
    Json(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Consistency ratios above this raise an advisory.
    pub consistency_threshold: f64,
    /// Core factor weight share below this raises an advisory.
    pub min_core_factor_share: f64,
    /// TOPSIS inputs are capped at this value.
    pub distance_value_cap: f64,
    /// Lower bound of the Profile Matching scale.
    pub profile_scale_min: f64,
    /// Upper bound of the Profile Matching scale.
    pub profile_scale_max: f64,
    /// Profile Matching considers at most this many alternatives.
    pub max_profile_alternatives: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: CONSISTENCY_THRESHOLD,
            min_core_factor_share: 0.5,
            distance_value_cap: 10.0,
            profile_scale_min: 1.0,
            profile_scale_max: 5.0,
            max_profile_alternatives: 5,
        }
    }
}

impl DecisionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.consistency_threshold.is_finite() || self.consistency_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "consistency_threshold must be >= 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_core_factor_share) {
            return Err(ConfigError::Invalid(
                "min_core_factor_share must be in [0,1]".to_string(),
            ));
        }
        if !self.distance_value_cap.is_finite() {
            return Err(ConfigError::Invalid(
                "distance_value_cap must be finite".to_string(),
            ));
        }
        if !(self.profile_scale_min.is_finite()
            && self.profile_scale_max.is_finite()
            && self.profile_scale_min < self.profile_scale_max)
        {
            return Err(ConfigError::Invalid(
                "profile scale requires finite min < max".to_string(),
            ));
        }
        if self.max_profile_alternatives < 2 {
            return Err(ConfigError::Invalid(
                "max_profile_alternatives must be >= 2".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads a config file; `.json` is parsed as JSON, anything else as TOML.
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<DecisionConfig, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => DecisionConfig::from_json_str(&raw),
        _ => DecisionConfig::from_toml_str(&raw),
    }
}
