#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! gates-diff library
//!
//! This library compares two snapshots of a compiled workspace's circuit
//! sizes and renders the changes as console tables and Markdown.
//! It can be used programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Diffing two workspace reports:
//!
//! ```
//! use gates_diff::diff::compute_workspace_diff;
//! use gates_diff::report::ReportLoader;
//!
//! let reference = ReportLoader::parse(
//!     r#"{"programs": [{"package_name": "p",
//!         "functions": [{"name": "main", "opcodes": 2, "circuit_size": 10}],
//!         "unconstrained_functions": []}], "contracts": []}"#,
//!     "reference",
//! )?;
//! let current = ReportLoader::parse(
//!     r#"{"programs": [{"package_name": "p",
//!         "functions": [{"name": "main", "opcodes": 3, "circuit_size": 15}],
//!         "unconstrained_functions": []}], "contracts": []}"#,
//!     "current",
//! )?;
//!
//! let diff = compute_workspace_diff(&reference, &current);
//! assert_eq!(diff.programs[0].circuit_size.delta, 5);
//! assert_eq!(diff.programs[0].circuit_size.percentage, 50.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Advanced Example: Markdown Report
//!
//! ```
//! use gates_diff::diff::{variation, DiffCircuit, SummaryQuantile};
//! use gates_diff::render::{markdown, MarkdownContext};
//!
//! let diffs = vec![DiffCircuit {
//!     name: "p".to_string(),
//!     opcodes: variation(3, 2),
//!     circuit_size: variation(15, 10),
//! }];
//! let context = MarkdownContext {
//!     header: "# Changes to circuit sizes",
//!     repository: Some("owner/repo"),
//!     commit_hash: Some("abc"),
//!     ref_commit_hash: None,
//!     quantile: SummaryQuantile::default(),
//! };
//!
//! let report = markdown::render_programs(&diffs, &context);
//! assert!(report.contains("[abc](https://github.com/owner/repo/commit/abc)"));
//! assert!(report.contains("**+50.00%**"));
//! ```

/// CI/CD integration tooling
pub mod cicd;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file and run settings
pub mod config;
/// Diff computation and summaries
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Git metadata utilities
pub mod git;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Console and Markdown rendering
pub mod render;
/// Workspace report model and loading
pub mod report;
/// Reference report storage
pub mod store;
