//! Reading and writing timeline documents.
//!
//! Documents are held as [`serde_json::Value`] whatever their on-disk
//! format, with object key order preserved so that a rewritten document
//! keeps its original layout.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DayBucketError, Result};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            _ => Err(DayBucketError::InvalidFormat(format!(
                "Unsupported file format for '{}'. Use .yaml, .yml, or .json",
                path.display()
            ))),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Parse text in the given format into a typed value.
pub fn parse_as<T: DeserializeOwned>(text: &str, format: DocumentFormat) -> Result<T> {
    match format {
        DocumentFormat::Json => serde_json::from_str(text)
            .map_err(|e| DayBucketError::ParseError(format!("Invalid JSON: {}", e))),
        DocumentFormat::Yaml => serde_yaml::from_str(text)
            .map_err(|e| DayBucketError::ParseError(format!("Invalid YAML: {}", e))),
    }
}

/// Parse a timeline document.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value> {
    parse_as(text, format)
}

/// Serialize a value as block-style YAML, leaving non-ASCII text unescaped.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value)
        .map_err(|e| DayBucketError::ParseError(format!("Failed to serialize YAML: {}", e)))
}
