//! Rule weighting configuration.
//!
//! Weights are read from a JSON, YAML or TOML file whose shape is
//!
//! ```json
//! {
//!   "category_weights": {"compliance": 1.5, "default": 1.0},
//!   "severity_weights": {"critical": 2.0, "default": 1.0},
//!   "rule_weights": {"rule1": 3.0}
//! }
//! ```
//!
//! Every section is optional and merges over the built-in defaults. Loading
//! through [`load_weights_configuration`] never fails: problems are logged and
//! reported through [`WeightsSource`] while the defaults are used.

use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Key used for the fallback weight inside a category or severity table.
pub const DEFAULT_WEIGHT_KEY: &str = "default";

/// Weights for categories, severities and individual rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub category_weights: BTreeMap<String, f64>,
    pub severity_weights: BTreeMap<String, f64>,
    /// Per-rule weights; these take precedence over category and severity.
    pub rule_weights: BTreeMap<String, f64>,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        let category_weights = [
            "data_quality",
            "completeness",
            "timeliness",
            "accuracy",
            "compliance",
            DEFAULT_WEIGHT_KEY,
        ]
        .into_iter()
        .map(|name| (name.to_string(), 1.0))
        .collect();

        let severity_weights = [
            ("critical", 2.0),
            ("high", 1.5),
            ("medium", 1.0),
            ("low", 0.5),
            ("info", 0.1),
            (DEFAULT_WEIGHT_KEY, 1.0),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        Self {
            category_weights,
            severity_weights,
            rule_weights: BTreeMap::new(),
        }
    }
}

/// Partial weights as written in a configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct WeightsOverrides {
    category_weights: BTreeMap<String, f64>,
    severity_weights: BTreeMap<String, f64>,
    rule_weights: BTreeMap<String, f64>,
}

fn lookup(table: &BTreeMap<String, f64>, key: Option<&str>) -> f64 {
    key.and_then(|k| table.get(k))
        .or_else(|| table.get(DEFAULT_WEIGHT_KEY))
        .copied()
        .unwrap_or(1.0)
}

impl WeightsConfig {
    /// Weight of a rule category, falling back to the `default` entry.
    pub fn category_weight(&self, category: Option<&str>) -> f64 {
        lookup(&self.category_weights, category)
    }

    /// Weight of a rule severity, falling back to the `default` entry.
    pub fn severity_weight(&self, severity: Option<&str>) -> f64 {
        lookup(&self.severity_weights, severity)
    }

    /// Effective weight of a rule.
    ///
    /// An explicit `rule_weights` entry wins; otherwise the category and
    /// severity weights are multiplied.
    ///
    /// # Examples
    ///
    /// ```
    /// use qa_analytics::config::WeightsConfig;
    ///
    /// let weights = WeightsConfig::default();
    /// assert_eq!(weights.weight_for_rule("r1", Some("compliance"), Some("critical")), 2.0);
    /// assert_eq!(weights.weight_for_rule("r1", None, Some("low")), 0.5);
    /// ```
    pub fn weight_for_rule(
        &self,
        rule_id: &str,
        category: Option<&str>,
        severity: Option<&str>,
    ) -> f64 {
        match self.rule_weights.get(rule_id) {
            Some(weight) => *weight,
            None => self.category_weight(category) * self.severity_weight(severity),
        }
    }

    fn merged_with(mut self, overrides: WeightsOverrides) -> Self {
        self.category_weights.extend(overrides.category_weights);
        self.severity_weights.extend(overrides.severity_weights);
        self.rule_weights.extend(overrides.rule_weights);
        self
    }

    /// Load weights from a file, merging them over the defaults.
    ///
    /// The format is chosen by extension: `.json`, `.yaml`/`.yml` or `.toml`.
    ///
    /// # Returns
    /// * `Ok(WeightsConfig)` if the file was read and parsed
    /// * `Err(AnalyticsError)` for I/O, parse or unsupported-format failures
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| AnalyticsError::io(path, e))?;

        let overrides: WeightsOverrides = match format {
            ConfigFormat::Json => {
                let mut de = serde_json::Deserializer::from_str(&content);
                serde_path_to_error::deserialize(&mut de)
                    .map_err(|e| AnalyticsError::json(path, e))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|source| AnalyticsError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            ConfigFormat::Toml => toml::from_str(&content).map_err(|source| {
                AnalyticsError::Toml {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
        };

        Ok(Self::default().merged_with(overrides))
    }
}

/// Configuration file formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> AnalyticsResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(AnalyticsError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Why the default weights were used instead of a requested file.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightsFallback {
    MissingFile,
    UnsupportedFormat,
    LoadFailed(String),
}

/// Where the effective weights came from.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightsSource {
    /// No file was requested.
    Defaults,
    /// The file was loaded and merged over the defaults.
    File(PathBuf),
    /// A file was requested but could not be used.
    Fallback {
        path: PathBuf,
        reason: WeightsFallback,
    },
}

/// Effective weights together with their provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWeights {
    pub weights: WeightsConfig,
    pub source: WeightsSource,
}

impl LoadedWeights {
    /// `true` when the built-in defaults are in effect.
    pub fn used_defaults(&self) -> bool {
        !matches!(self.source, WeightsSource::File(_))
    }
}

/// Load the weights configuration, falling back to defaults on any problem.
///
/// A missing file or unsupported extension is logged as a warning; read and
/// parse failures are logged as errors. In every case the aggregation can
/// proceed with the defaults.
pub fn load_weights_configuration(path: Option<&Path>) -> LoadedWeights {
    let Some(path) = path else {
        return LoadedWeights {
            weights: WeightsConfig::default(),
            source: WeightsSource::Defaults,
        };
    };

    let fallback = |reason: WeightsFallback| LoadedWeights {
        weights: WeightsConfig::default(),
        source: WeightsSource::Fallback {
            path: path.to_path_buf(),
            reason,
        },
    };

    if !path.exists() {
        warn!(
            "Weights configuration {} not found; using default weights",
            path.display()
        );
        return fallback(WeightsFallback::MissingFile);
    }

    if ConfigFormat::from_path(path).is_err() {
        warn!("Unsupported config file format: {}", path.display());
        return fallback(WeightsFallback::UnsupportedFormat);
    }

    match WeightsConfig::from_file(path) {
        Ok(weights) => LoadedWeights {
            weights,
            source: WeightsSource::File(path.to_path_buf()),
        },
        Err(e) => {
            error!("Error loading weights configuration: {}", e);
            fallback(WeightsFallback::LoadFailed(e.to_string()))
        }
    }
}
