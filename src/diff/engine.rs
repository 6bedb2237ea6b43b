//! Program-level diff computation

use super::cell::{variation, DiffCell};
use super::matcher::{match_entities, Named};
use crate::report::{BrilligReport, CircuitReport, ProgramReport};
use serde::Serialize;

/// A named entity exposing the measurements the engine compares
///
/// Programs implement it directly; contract functions go through an adapter
/// so the same matching, filtering and ranking apply one level down.
pub trait MetricSource: Named {
    /// The constrained `main` circuit, if any
    fn main_circuit(&self) -> Option<&CircuitReport>;

    /// The unconstrained `main` function, if any
    fn main_unconstrained(&self) -> Option<&BrilligReport>;
}

impl Named for ProgramReport {
    fn name(&self) -> &str {
        &self.package_name
    }
}

impl MetricSource for ProgramReport {
    fn main_circuit(&self) -> Option<&CircuitReport> {
        self.functions.first()
    }

    fn main_unconstrained(&self) -> Option<&BrilligReport> {
        self.unconstrained_functions.first()
    }
}

/// Circuit (ACIR) size change of one program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffCircuit {
    /// Program name
    pub name: String,
    /// ACIR opcode count change
    pub opcodes: DiffCell,
    /// Circuit size change
    pub circuit_size: DiffCell,
}

impl DiffCircuit {
    /// True if neither the opcode count nor the circuit size moved
    pub fn is_empty(&self) -> bool {
        self.opcodes.is_unchanged() && self.circuit_size.is_unchanged()
    }
}

/// Unconstrained (Brillig) opcode change of one program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffBrillig {
    /// Program name
    pub name: String,
    /// Brillig opcode count change
    pub opcodes: DiffCell,
}

impl DiffBrillig {
    /// Placeholder for programs lacking unconstrained functions on a side
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            opcodes: DiffCell::ZERO,
        }
    }

    /// True if the opcode count did not move
    pub fn is_empty(&self) -> bool {
        self.opcodes.is_unchanged()
    }
}

fn circuit_diff(source: &CircuitReport, compare: &CircuitReport, name: &str) -> DiffCircuit {
    DiffCircuit {
        name: name.to_string(),
        opcodes: variation(compare.opcodes, source.opcodes),
        circuit_size: variation(compare.circuit_size, source.circuit_size),
    }
}

fn brillig_diff(source: &BrilligReport, compare: &BrilligReport, name: &str) -> DiffBrillig {
    DiffBrillig {
        name: name.to_string(),
        opcodes: variation(compare.opcodes, source.opcodes),
    }
}

/// Diff the `main` functions of every program present in both snapshots
///
/// Returns the circuit diffs and the Brillig diffs, each without zero-change
/// entries and sorted by decreasing percentage (circuit size for circuits,
/// opcodes for Brillig). Diffs are tagged with the program name, not the
/// function name.
///
/// # Examples
///
/// ```
/// use gates_diff::diff::compute_program_diffs;
/// use gates_diff::report::{CircuitReport, ProgramReport};
///
/// let program = |opcodes, circuit_size| ProgramReport {
///     package_name: "b".to_string(),
///     functions: vec![CircuitReport { name: "main".to_string(), opcodes, circuit_size }],
///     unconstrained_functions: vec![],
/// };
///
/// let (circuits, brilligs) = compute_program_diffs(&[program(5, 10)], &[program(4, 8)]);
/// assert_eq!(circuits[0].circuit_size.delta, -2);
/// assert_eq!(circuits[0].circuit_size.percentage, -20.0);
/// assert!(brilligs.is_empty());
/// ```
pub fn compute_program_diffs<T: MetricSource>(
    source: &[T],
    compare: &[T],
) -> (Vec<DiffCircuit>, Vec<DiffBrillig>) {
    let pairs = match_entities(source, compare);

    let mut circuits: Vec<DiffCircuit> = pairs
        .iter()
        .filter_map(|pair| {
            match (pair.source.main_circuit(), pair.compare.main_circuit()) {
                (Some(src), Some(cmp)) => Some(circuit_diff(src, cmp, pair.name)),
                _ => {
                    log::warn!("Skipping '{}': no main circuit to compare", pair.name);
                    None
                }
            }
        })
        .filter(|diff| !diff.is_empty())
        .collect();
    circuits.sort_by(|a, b| b.circuit_size.percentage.total_cmp(&a.circuit_size.percentage));

    let mut brilligs: Vec<DiffBrillig> = pairs
        .iter()
        .map(|pair| {
            match (
                pair.source.main_unconstrained(),
                pair.compare.main_unconstrained(),
            ) {
                (Some(src), Some(cmp)) => brillig_diff(src, cmp, pair.name),
                _ => DiffBrillig::empty(),
            }
        })
        .filter(|diff| !diff.is_empty())
        .collect();
    brilligs.sort_by(|a, b| b.opcodes.percentage.total_cmp(&a.opcodes.percentage));

    (circuits, brilligs)
}
