//! Session tuning loaded from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::gravity::GravityPreset;
use crate::core::range::DEFAULT_ERROR_MARGIN;

pub const CONFIG_PATH_ENV: &str = "ARCHERY_CONFIG";

/// What happens to the best distance when the user resets or fires again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxDistancePolicy {
    #[default]
    Persist,
    ClearOnReset,
    ClearOnFire,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub initial_angle_deg: f64,
    pub initial_strength: f64,
    pub initial_gravity: GravityPreset,
    /// Degrees per second while an aim key is held.
    pub angle_rate_deg_per_s: f64,
    pub strength_rate_per_s: f64,
    pub error_margin_fraction: f64,
    pub max_samples: usize,
    pub max_distance_policy: MaxDistancePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_angle_deg: 45.0,
            initial_strength: 50.0,
            initial_gravity: GravityPreset::Earth,
            angle_rate_deg_per_s: 30.0,
            strength_rate_per_s: 12.0,
            error_margin_fraction: DEFAULT_ERROR_MARGIN,
            max_samples: 4096,
            max_distance_policy: MaxDistancePolicy::Persist,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl SessionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the file named by `ARCHERY_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load_or_default(Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Missing or invalid files log a warning and yield the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded session config");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "using default session config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.initial_angle_deg,
            self.initial_strength,
            self.angle_rate_deg_per_s,
            self.strength_rate_per_s,
            self.error_margin_fraction,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid(
                "numeric settings must be finite".to_string(),
            ));
        }
        if self.angle_rate_deg_per_s <= 0.0 || self.strength_rate_per_s <= 0.0 {
            return Err(ConfigError::Invalid(
                "adjustment rates must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.error_margin_fraction) {
            return Err(ConfigError::Invalid(format!(
                "error_margin_fraction must be in [0, 1), got {}",
                self.error_margin_fraction
            )));
        }
        if self.max_samples < 2 {
            return Err(ConfigError::Invalid(format!(
                "max_samples must be at least 2, got {}",
                self.max_samples
            )));
        }
        Ok(())
    }
}
