//! Report file loading

use super::WorkspaceReport;
use crate::error::GatesDiffError;
use crate::infra::FileSystem;
use anyhow::Result;
use std::path::Path;

/// Reads and parses workspace report files
pub struct ReportLoader;

impl ReportLoader {
    /// Read the raw content of a report file
    ///
    /// `role` names the report in error messages ("current", "reference").
    pub fn read_with_fs<FS: FileSystem>(path: &Path, role: &str, fs: &FS) -> Result<String> {
        match fs.read_to_string(path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(GatesDiffError::ReportNotFound {
                    path: path.to_path_buf(),
                    role: role.to_string(),
                }
                .into())
            }
            Err(e) => Err(GatesDiffError::Io {
                context: format!("reading {} report {}", role, path.display()),
                source: e,
            }
            .into()),
        }
    }

    /// Parse report content, rejecting programs without a `main` circuit
    ///
    /// # Examples
    ///
    /// ```
    /// use gates_diff::report::ReportLoader;
    ///
    /// let report = ReportLoader::parse(r#"{"programs": [], "contracts": []}"#, "inline")?;
    /// assert!(report.programs.is_empty());
    ///
    /// assert!(ReportLoader::parse("not json", "inline").is_err());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn parse(content: &str, origin: &str) -> Result<WorkspaceReport> {
        let report =
            WorkspaceReport::from_json(content).map_err(|e| GatesDiffError::MalformedReport {
                origin: origin.to_string(),
                source: e,
            })?;

        if let Some(program) = report.programs_without_main().next() {
            return Err(GatesDiffError::MissingMainCircuit {
                program: program.package_name.clone(),
                origin: origin.to_string(),
            }
            .into());
        }

        Ok(report)
    }
}
