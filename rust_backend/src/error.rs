//! Error types for analytics file operations.

use std::path::PathBuf;

/// Result type for analytics operations that can fail.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Error type for loading and persisting analytics data.
///
/// Aggregation itself never fails; these errors only surface from file
/// reads/writes and from decoding configuration or summary documents.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path} at '{location}': {source}")]
    Json {
        path: PathBuf,
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalyticsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyticsError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(
        path: impl Into<PathBuf>,
        err: serde_path_to_error::Error<serde_json::Error>,
    ) -> Self {
        AnalyticsError::Json {
            path: path.into(),
            location: err.path().to_string(),
            source: err.into_inner(),
        }
    }

    /// Returns `true` when the error came from the filesystem rather than
    /// from decoding file contents.
    pub fn is_io(&self) -> bool {
        matches!(self, AnalyticsError::Io { .. })
    }
}
