//! Loading test data documents from YAML or JSON.
//!
//! ```yaml
//! segments:
//!   - name: customer
//!     fields: [first_name, balance]
//!     rows:
//!       - values: { first_name: Alice, balance: "10.50" }
//!       - values: { first_name: ~, balance: "<NULL>" }
//!         ignored: "pending fix"
//! ```

use super::model::TestDataMetadata;
use crate::result::{VerifyError, VerifyResult};
use std::path::Path;

/// Supported test data document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// JSON (`.json`)
    Json,
}

impl DataFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> VerifyResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(VerifyError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

impl TestDataMetadata {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> VerifyResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| VerifyError::ParseError(e.to_string()))
    }

    /// Parse a JSON document
    pub fn from_json(json: &str) -> VerifyResult<Self> {
        serde_json::from_str(json).map_err(|e| VerifyError::ParseError(e.to_string()))
    }

    /// Parse a document in the given format
    pub fn parse(text: &str, format: DataFormat) -> VerifyResult<Self> {
        match format {
            DataFormat::Yaml => Self::from_yaml(text),
            DataFormat::Json => Self::from_json(text),
        }
    }

    /// Load a document, choosing the format by file extension
    pub fn load(path: impl AsRef<Path>) -> VerifyResult<Self> {
        let path = path.as_ref();
        let format = DataFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let metadata = Self::parse(&text, format)?;
        tracing::info!(
            path = %path.display(),
            segments = metadata.len(),
            "loaded test data"
        );
        Ok(metadata)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> VerifyResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| VerifyError::Serialization(e.to_string()))
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> VerifyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VerifyError::Serialization(e.to_string()))
    }
}
