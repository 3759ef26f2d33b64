//! Configuration for network construction.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::Deserialize;

use crate::walkable::WalkingModel;

/// Errors from loading or validating a [`NetworkConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] InvalidConfig),
}

/// A configuration value out of its allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid config: {reason}")]
pub struct InvalidConfig {
    reason: &'static str,
}

impl InvalidConfig {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Constants that shape the graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Minimum time between arriving at a station without transfer rules
    /// and boarding another route there (seconds).
    pub min_waiting_delay_secs: u32,

    /// Stations farther than this from a query point are not walked to.
    pub max_walking_distance_km: f64,

    /// Walking speed used for access and egress legs.
    pub walking_speed_kmh: f64,
}

impl NetworkConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_waiting_delay_secs: u32,
        max_walking_distance_km: f64,
        walking_speed_kmh: f64,
    ) -> Self {
        Self {
            min_waiting_delay_secs,
            max_walking_distance_km,
            walking_speed_kmh,
        }
    }

    /// Read and validate a configuration from a JSON file. Missing fields
    /// take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !(self.walking_speed_kmh.is_finite() && self.walking_speed_kmh > 0.0) {
            return Err(InvalidConfig::new("walking speed must be positive"));
        }
        if !(self.max_walking_distance_km.is_finite() && self.max_walking_distance_km >= 0.0) {
            return Err(InvalidConfig::new(
                "maximum walking distance must be nonnegative",
            ));
        }
        Ok(())
    }

    /// Returns the minimum waiting delay as a Duration.
    pub fn min_waiting_delay(&self) -> Duration {
        Duration::seconds(i64::from(self.min_waiting_delay_secs))
    }

    /// Walking model with the great-circle distance metric.
    pub fn walking_model(&self) -> WalkingModel {
        WalkingModel::new(self.max_walking_distance_km, self.walking_speed_kmh)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            min_waiting_delay_secs: 60,
            max_walking_distance_km: 1.5,
            walking_speed_kmh: 5.0,
        }
    }
}
