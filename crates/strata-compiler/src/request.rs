//! Compile requests: an upstream relation plus a raw export-sink config
//!
//! Requests are read from YAML (`.yaml`/`.yml`) or JSON files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_ir::otel::OTelData;
use strata_ir::TableType;

use crate::driver::DriverError;

fn default_source_name() -> String {
    "input".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileRequest {
    /// Name of the upstream table, used only for logging
    #[serde(default = "default_source_name")]
    pub source_name: String,

    /// Relation produced by the sink's parent
    pub relation: TableType,

    /// Exporter config, columns referenced by name
    pub sink: OTelData<String>,
}

impl CompileRequest {
    pub fn from_yaml(contents: &str) -> Result<Self, DriverError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_json(contents: &str) -> Result<Self, DriverError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load a request, picking the format from the file extension.
    ///
    /// Anything that is not `.yaml` or `.yml` is parsed as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DriverError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            _ => Self::from_json(&contents),
        }
    }
}
