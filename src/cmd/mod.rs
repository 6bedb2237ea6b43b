//! Command handlers for gates-diff CLI
//!
//! This module contains all command implementations, organized by functionality.
//! Each submodule handles a specific CLI command.

pub mod completions;
pub mod diff;

// Re-export command functions for convenient access
pub use completions::cmd_completions;
pub use diff::{cmd_diff, run_diff_with, DiffOutcome, ReferenceSource};
