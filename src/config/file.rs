//! Configuration file data structures

use crate::diff::SummaryQuantile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".gates-diff.toml";

/// gates-diff configuration file structure
///
/// Every key is optional; command-line flags and CI variables take
/// precedence over the file.
///
/// ```toml
/// report = "gates_report.json"
/// header = "# Changes to circuit sizes"
/// summary-quantile = 0.8
/// store-dir = ".gates-diff/artifacts"
/// repository = "noir-lang/noir"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to the current workspace report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,

    /// Title line of the Markdown report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    /// Quantile selecting the summary rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_quantile: Option<f64>,

    /// Directory of the local reference store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,

    /// GitHub `owner/name` used for commit links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl ConfigFile {
    /// Validate value ranges the TOML types cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Some(quantile) = self.summary_quantile {
            SummaryQuantile::new(quantile)
                .map_err(|_| format!("summary-quantile must be within [0, 1], got {}", quantile))?;
        }

        if matches!(&self.header, Some(header) if header.trim().is_empty()) {
            return Err("header must not be empty".to_string());
        }

        Ok(())
    }
}
