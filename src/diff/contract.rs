//! Contract-level diff computation

use super::engine::{compute_program_diffs, DiffCircuit, MetricSource};
use super::matcher::{match_entities, Named};
use crate::report::{BrilligReport, CircuitReport, ContractReport};
use serde::Serialize;

/// Function-level changes of one contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffContract {
    /// Contract name
    pub name: String,
    /// Changed functions, most changed first
    pub functions: Vec<DiffCircuit>,
}

impl DiffContract {
    /// Largest absolute circuit size percentage among the functions
    pub fn max_change(&self) -> f64 {
        self.functions
            .iter()
            .map(|f| f.circuit_size.magnitude())
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Named for ContractReport {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A contract function seen as a single-function program
struct FunctionAsProgram<'a>(&'a CircuitReport);

impl Named for FunctionAsProgram<'_> {
    fn name(&self) -> &str {
        &self.0.name
    }
}

impl MetricSource for FunctionAsProgram<'_> {
    fn main_circuit(&self) -> Option<&CircuitReport> {
        Some(self.0)
    }

    fn main_unconstrained(&self) -> Option<&BrilligReport> {
        None
    }
}

fn as_programs(contract: &ContractReport) -> Vec<FunctionAsProgram<'_>> {
    contract.functions.iter().map(FunctionAsProgram).collect()
}

fn contract_diff(source: &ContractReport, compare: &ContractReport) -> DiffContract {
    let (functions, _) = compute_program_diffs(&as_programs(source), &as_programs(compare));

    DiffContract {
        name: source.name.clone(),
        functions,
    }
}

/// Diff the functions of every contract present in both snapshots
///
/// Contracts without any changed function are dropped; the rest are sorted by
/// decreasing largest absolute circuit size change.
pub fn compute_contract_diffs(
    source: &[ContractReport],
    compare: &[ContractReport],
) -> Vec<DiffContract> {
    let mut diffs: Vec<DiffContract> = match_entities(source, compare)
        .iter()
        .map(|pair| contract_diff(pair.source, pair.compare))
        .filter(|diff| !diff.functions.is_empty())
        .collect();

    diffs.sort_by(|a, b| b.max_change().total_cmp(&a.max_change()));
    diffs
}
