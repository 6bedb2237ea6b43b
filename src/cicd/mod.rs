//! CI/CD integration module
//!
//! Provides:
//! - GitHub Actions step outputs (`shell`, `markdown`)
//! - JSON output for CI/CD tool integration

pub mod github;
pub mod output;

pub use github::GithubOutput;
pub use output::{JsonOutput, SummaryInfo};
