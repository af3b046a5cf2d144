use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Represents the source format of result documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSourceType {
    Json,
    Yaml,
}

/// Raw result documents read from one source
#[derive(Debug)]
pub struct ResultLoadResult {
    pub documents: Vec<Value>,
    pub source_type: ResultSourceType,
    pub num_documents: usize,
}

impl ResultLoadResult {
    pub fn new(documents: Vec<Value>, source_type: ResultSourceType) -> Self {
        let num_documents = documents.len();
        Self {
            documents,
            source_type,
            num_documents,
        }
    }
}

/// A file holds either one result document or an array of them.
fn into_documents(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![value]),
        other => anyhow::bail!(
            "Expected a result object or an array of results, found {}",
            match other {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                _ => "a string",
            }
        ),
    }
}

/// Unified interface for loading raw result documents from JSON or YAML
pub struct ResultLoader;

impl ResultLoader {
    /// Load result documents from a file (auto-detects JSON or YAML)
    pub fn load_from_file(path: &Path) -> Result<ResultLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        let source_type = match extension.to_lowercase().as_str() {
            "json" => ResultSourceType::Json,
            "yaml" | "yml" => ResultSourceType::Yaml,
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let loaded = match source_type {
            ResultSourceType::Json => Self::load_from_json_str(&content),
            ResultSourceType::Yaml => Self::load_from_yaml_str(&content),
        }
        .with_context(|| format!("Failed to load results from {}", path.display()))?;

        debug!(
            "Loaded {} result documents from {}",
            loaded.num_documents,
            path.display()
        );
        Ok(loaded)
    }

    /// Load result documents from a JSON string
    pub fn load_from_json_str(json_str: &str) -> Result<ResultLoadResult> {
        let value: Value = serde_json::from_str(json_str).context("Failed to parse JSON")?;
        Ok(ResultLoadResult::new(
            into_documents(value)?,
            ResultSourceType::Json,
        ))
    }

    /// Load result documents from a YAML string
    pub fn load_from_yaml_str(yaml_str: &str) -> Result<ResultLoadResult> {
        let value: Value = serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?;
        Ok(ResultLoadResult::new(
            into_documents(value)?,
            ResultSourceType::Yaml,
        ))
    }

    /// Load and concatenate the documents of several files, in order
    pub fn load_many<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Value>> {
        let mut documents = Vec::new();
        for path in paths {
            let loaded = Self::load_from_file(path.as_ref())?;
            documents.extend(loaded.documents);
        }
        Ok(documents)
    }
}
