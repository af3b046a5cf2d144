//! Outlier and exception thresholds.
//!
//! Thresholds can be read from a TOML file such as
//!
//! ```toml
//! high_performer_threshold = 0.97
//! z_score_threshold = 2.0
//! ```
//!
//! Fields left out of the file keep their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Compliance-rate thresholds used when tagging leaders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Rates at or above this mark a high performer.
    #[serde(default = "default_high_performer_threshold")]
    pub high_performer_threshold: f64,
    /// Rates at or below this need attention.
    #[serde(default = "default_concern_threshold")]
    pub concern_threshold: f64,
    /// Rates at or below this are critical.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,
    /// Absolute z-score beyond which a leader is a statistical outlier.
    #[serde(default = "default_z_score_threshold")]
    pub z_score_threshold: f64,
}

fn default_high_performer_threshold() -> f64 {
    0.95
}

fn default_concern_threshold() -> f64 {
    0.75
}

fn default_critical_threshold() -> f64 {
    0.60
}

fn default_z_score_threshold() -> f64 {
    1.5
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high_performer_threshold: default_high_performer_threshold(),
            concern_threshold: default_concern_threshold(),
            critical_threshold: default_critical_threshold(),
            z_score_threshold: default_z_score_threshold(),
        }
    }
}

impl ThresholdConfig {
    /// Load thresholds from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ThresholdConfig)` if successful
    /// * `Err(AnalyticsError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| AnalyticsError::io(path, e))?;

        toml::from_str(&content).map_err(|source| AnalyticsError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}
