//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Workspace report fixtures
//! - Assertion helpers for rendered reports
//! - A `gates-diff` command isolated from the host CI environment

pub mod assertions;
pub mod fixtures;

use assert_cmd::Command;
use std::path::Path;

/// GitHub Actions variables read by the binary
pub const CI_VARIABLES: [&str; 6] = [
    "GITHUB_REPOSITORY",
    "GITHUB_SHA",
    "GITHUB_BASE_REF",
    "GITHUB_HEAD_REF",
    "GITHUB_REF_NAME",
    "GITHUB_OUTPUT",
];


/// `gates-diff` run in `dir`, without any inherited CI variables
#[allow(dead_code)]
pub fn gates_diff(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gates-diff"));
    for var in CI_VARIABLES {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG").current_dir(dir);
    cmd
}
