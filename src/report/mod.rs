//! Workspace report snapshots
//!
//! A workspace report is the JSON document emitted by the compiler's
//! info command: one entry per compiled program (with its constrained and
//! unconstrained functions) and one entry per contract. Two such snapshots
//! are the inputs of every comparison.

mod loader;

pub use loader::ReportLoader;

use serde::{Deserialize, Serialize};

/// Size measurement of one constrained (ACIR) function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitReport {
    /// Function name
    pub name: String,
    /// Number of ACIR opcodes
    pub opcodes: u64,
    /// Backend circuit size
    pub circuit_size: u64,
}

/// Size measurement of one unconstrained (Brillig) function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrilligReport {
    /// Function name
    pub name: String,
    /// Number of Brillig opcodes
    pub opcodes: u64,
}

/// One compiled program package
///
/// The first entry of `functions` is the program's `main` circuit, and the
/// first entry of `unconstrained_functions` its `main` when compiled to Brillig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramReport {
    /// Name of the program package
    pub package_name: String,
    /// Constrained functions, `main` first
    pub functions: Vec<CircuitReport>,
    /// Unconstrained functions, `main` first
    #[serde(default)]
    pub unconstrained_functions: Vec<BrilligReport>,
}

/// One compiled contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractReport {
    /// Contract name
    pub name: String,
    /// Compiled contract functions
    pub functions: Vec<CircuitReport>,
}

/// Snapshot of a whole workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceReport {
    /// Compiled programs
    #[serde(default)]
    pub programs: Vec<ProgramReport>,
    /// Compiled contracts
    #[serde(default)]
    pub contracts: Vec<ContractReport>,
}

impl WorkspaceReport {
    /// Parse a workspace report from its JSON representation
    ///
    /// # Examples
    ///
    /// ```
    /// use gates_diff::report::WorkspaceReport;
    ///
    /// let report = WorkspaceReport::from_json(
    ///     r#"{"programs": [{"package_name": "a", "functions": [
    ///         {"name": "main", "opcodes": 3, "circuit_size": 10}
    ///     ]}], "contracts": []}"#,
    /// )?;
    ///
    /// assert_eq!(report.programs[0].package_name, "a");
    /// assert!(report.programs[0].unconstrained_functions.is_empty());
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Programs whose `functions` list is empty, i.e. without a `main` circuit
    pub fn programs_without_main(&self) -> impl Iterator<Item = &ProgramReport> {
        self.programs.iter().filter(|p| p.functions.is_empty())
    }
}
