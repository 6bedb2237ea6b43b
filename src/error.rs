//! Error types with contextual suggestions
//!
//! Every error carries:
//! - An actionable message naming the file or value involved
//! - A suggested fix, where one exists
//! - A documentation link for configuration problems
//! - A sysexits-style exit code for CI
//!
//! # Examples
//!
//! ```
//! use gates_diff::error::GatesDiffError;
//! use std::path::PathBuf;
//!
//! let err = GatesDiffError::ReportNotFound {
//!     path: PathBuf::from("gates_report.json"),
//!     role: "current".to_string(),
//! };
//!
//! assert_eq!(err.exit_code(), 66);
//! assert!(err.suggestion().unwrap().contains("gates_report.json"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

/// Errors raised while loading reports, resolving settings and storing
/// reference snapshots
#[derive(Error, Debug)]
pub enum GatesDiffError {
    /// Report file does not exist
    #[error("{role} report not found: {}", path.display())]
    ReportNotFound {
        /// Path to the report file
        path: PathBuf,
        /// Which report was expected ("current", "reference")
        role: String,
    },

    /// Report content is not a valid workspace report
    #[error("Malformed workspace report: {origin}")]
    MalformedReport {
        /// File or artifact the content came from
        origin: String,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// A program has no `main` circuit to compare
    #[error("Program '{program}' in {origin} has no main circuit")]
    MissingMainCircuit {
        /// Program package name
        program: String,
        /// File or artifact the report came from
        origin: String,
    },

    /// Summary quantile outside `[0, 1]`
    #[error("Invalid summary quantile: {value}")]
    InvalidQuantile {
        /// Rejected value
        value: f64,
    },

    /// Configuration file could not be parsed or holds invalid values
    #[error("Invalid configuration in {}: {message}", path.display())]
    InvalidConfig {
        /// Path to the configuration file
        path: PathBuf,
        /// Parser or validation message
        message: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Reference store failure
    #[error("reference store error: {0}")]
    Store(#[from] StoreError),
}

impl GatesDiffError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gates_diff::error::GatesDiffError;
    ///
    /// let error = GatesDiffError::InvalidQuantile { value: 1.5 };
    /// assert!(error.suggestion().unwrap().contains("between 0 and 1"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ReportNotFound { path, role } if role == "reference" => Some(format!(
                "Generate {} on the base branch, or pass --reference <path>",
                path.display()
            )),
            Self::ReportNotFound { path, .. } => Some(format!(
                "Generate {} first (nargo info --json > {}), or pass --report <path>",
                path.display(),
                path.display()
            )),
            Self::MalformedReport { .. } => Some(
                "The report must be a JSON object with `programs` and `contracts` arrays"
                    .to_string(),
            ),
            Self::MissingMainCircuit { program, .. } => Some(format!(
                "Every program needs at least one entry in `functions`; check how '{}' was reported",
                program
            )),
            Self::InvalidQuantile { .. } => {
                Some("Use a quantile between 0 and 1, e.g. --quantile 0.8".to_string())
            }
            Self::InvalidConfig { path, .. } => Some(format!(
                "Fix or remove {} (supported keys: report, header, summary-quantile, store-dir, repository)",
                path.display()
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
            Self::Store(StoreError::Metadata { artifact, .. }) => Some(format!(
                "Delete the metadata sidecar of '{}' from the store directory",
                artifact
            )),
            Self::Store(_) => Some(
                "Check that the store directory is writable, or pass --no-upload".to_string(),
            ),
        }
    }

    /// Get documentation URL for this error.
    pub fn docs_url(&self) -> Option<&str> {
        match self {
            Self::MalformedReport { .. }
            | Self::MissingMainCircuit { .. }
            | Self::InvalidConfig { .. } => Some("https://github.com/noir-lang/noir-gates-diff"),
            _ => None,
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use gates_diff::error::GatesDiffError;
    ///
    /// let error = GatesDiffError::InvalidQuantile { value: -1.0 };
    /// assert_eq!(error.exit_code(), 64); // EX_USAGE
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ReportNotFound { .. } => 66,     // EX_NOINPUT
            Self::MalformedReport { .. } => 65,    // EX_DATAERR
            Self::MissingMainCircuit { .. } => 65, // EX_DATAERR
            Self::InvalidQuantile { .. } => 64,    // EX_USAGE
            Self::InvalidConfig { .. } => 78,      // EX_CONFIG
            Self::Io { .. } => 74,                 // EX_IOERR
            Self::Store(_) => 74,
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain, suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(gd_error) = error.downcast_ref::<GatesDiffError>() {
            if let Some(suggestion) = gd_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            if let Some(docs) = gd_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        error
            .downcast_ref::<GatesDiffError>()
            .map_or(1, GatesDiffError::exit_code)
    }
}
