//! Diff computation between two workspace snapshots
//!
//! Programs and contracts are paired across the reference and current
//! snapshots by exact name, their metrics compared cell by cell, unchanged
//! entries dropped, and the remainder ranked by decreasing change. The
//! [`summary`] module then selects the most significant subset.

mod cell;
mod contract;
mod engine;
mod matcher;
pub mod summary;

pub use cell::{variation, DiffCell, Trend};
pub use contract::{compute_contract_diffs, DiffContract};
pub use engine::{compute_program_diffs, DiffBrillig, DiffCircuit, MetricSource};
pub use matcher::{match_entities, match_names, MatchedPair, NameIndex, Named};
pub use summary::{
    change_threshold, summarize, summarize_contracts, Significance, Summary, SummaryQuantile,
    DEFAULT_SUMMARY_QUANTILE,
};

use crate::report::WorkspaceReport;
use serde::Serialize;

/// Every diff between two workspace snapshots
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceDiff {
    /// Program circuit diffs
    pub programs: Vec<DiffCircuit>,
    /// Program Brillig diffs
    pub unconstrained_functions: Vec<DiffBrillig>,
    /// Contract diffs
    pub contracts: Vec<DiffContract>,
}

impl WorkspaceDiff {
    /// True if nothing changed anywhere
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty() && self.unconstrained_functions.is_empty() && self.contracts.is_empty()
    }
}

/// Diff two workspace snapshots
///
/// `source` is the reference snapshot, `compare` the current one.
pub fn compute_workspace_diff(source: &WorkspaceReport, compare: &WorkspaceReport) -> WorkspaceDiff {
    let (programs, unconstrained_functions) =
        compute_program_diffs(&source.programs, &compare.programs);

    WorkspaceDiff {
        programs,
        unconstrained_functions,
        contracts: compute_contract_diffs(&source.contracts, &compare.contracts),
    }
}
