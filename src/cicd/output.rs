//! JSON output formatting for CI/CD integration

use crate::diff::{summarize, summarize_contracts, SummaryQuantile, WorkspaceDiff};
use crate::render::ReportKind;
use serde::Serialize;

/// JSON output structure for CI/CD tools
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Kind of program metrics the report is about
    pub kind: ReportKind,
    /// Summary quantile
    pub quantile: f64,
    /// Commit the current report was generated at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<&'a str>,
    /// Commit of the reference report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_commit_hash: Option<&'a str>,
    /// Sizes of the summary and full views
    pub summary: SummaryInfo,
    /// Every diff
    pub diff: &'a WorkspaceDiff,
}

/// Row counts of the summary and of the full report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryInfo {
    /// Significant circuit diffs
    pub programs: usize,
    /// Significant Brillig diffs
    pub unconstrained_functions: usize,
    /// Contracts with at least one significant function diff
    pub contracts: usize,
    /// Rows of the full report, all collections together
    pub total: usize,
}

impl SummaryInfo {
    /// Count the significant diffs of every collection
    pub fn new(diff: &WorkspaceDiff, quantile: SummaryQuantile) -> Self {
        Self {
            programs: summarize(&diff.programs, quantile).summary.len(),
            unconstrained_functions: summarize(&diff.unconstrained_functions, quantile)
                .summary
                .len(),
            contracts: summarize_contracts(&diff.contracts, quantile).len(),
            total: diff.programs.len() + diff.unconstrained_functions.len() + diff.contracts.len(),
        }
    }
}

impl<'a> JsonOutput<'a> {
    /// Create a new JSON output
    pub fn new(diff: &'a WorkspaceDiff, kind: ReportKind, quantile: SummaryQuantile) -> Self {
        Self {
            kind,
            quantile: quantile.value(),
            commit_hash: None,
            ref_commit_hash: None,
            summary: SummaryInfo::new(diff, quantile),
            diff,
        }
    }

    /// Add the compared commits
    pub fn with_commits(mut self, commit_hash: Option<&'a str>, ref_commit_hash: Option<&'a str>) -> Self {
        self.commit_hash = commit_hash;
        self.ref_commit_hash = ref_commit_hash;
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON output: {}", e))
    }

    /// Print JSON to stdout
    pub fn print(&self) {
        match self.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error formatting JSON: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{variation, DiffCircuit};

    fn diff() -> WorkspaceDiff {
        WorkspaceDiff {
            programs: vec![
                DiffCircuit {
                    name: "new".to_string(),
                    opcodes: variation(4, 0),
                    circuit_size: variation(9, 0),
                },
                DiffCircuit {
                    name: "small".to_string(),
                    opcodes: variation(11, 10),
                    circuit_size: variation(101, 100),
                },
            ],
            unconstrained_functions: vec![],
            contracts: vec![],
        }
    }

    #[test]
    fn test_summary_info_counts_significant_rows() {
        let diff = diff();
        let info = SummaryInfo::new(&diff, SummaryQuantile::new(1.0).unwrap());

        assert_eq!(info.programs, 1);
        assert_eq!(info.contracts, 0);
        assert_eq!(info.total, 2);
    }

    #[test]
    fn test_json_output_serializes_infinity_as_string() {
        let diff = diff();
        let output = JsonOutput::new(&diff, ReportKind::Circuit, SummaryQuantile::default())
            .with_commits(Some("abc"), None);

        let json = output.to_json().unwrap();
        assert!(json.contains("\"kind\": \"circuit\""));
        assert!(json.contains("\"percentage\": \"Infinity\""));
        assert!(json.contains("\"commit_hash\": \"abc\""));
        assert!(!json.contains("ref_commit_hash"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["diff"]["programs"][1]["circuit_size"]["percentage"], 1.0);
        assert_eq!(value["quantile"], 0.8);
    }
}
