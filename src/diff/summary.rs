//! Quantile-based selection of the most significant diffs

use super::contract::DiffContract;
use super::engine::{DiffBrillig, DiffCircuit};
use crate::error::GatesDiffError;
use serde::Serialize;

/// Default quantile: the summary shows roughly the top 20% of changes
pub const DEFAULT_SUMMARY_QUANTILE: f64 = 0.8;

/// Quantile in `[0, 1]` used to pick the summary threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryQuantile(f64);

impl SummaryQuantile {
    /// Validate a quantile value
    ///
    /// # Examples
    ///
    /// ```
    /// use gates_diff::diff::SummaryQuantile;
    ///
    /// let q = SummaryQuantile::new(0.8)?;
    /// assert_eq!(q.significant_percent(), 20);
    ///
    /// assert!(SummaryQuantile::new(1.5).is_err());
    /// assert!(SummaryQuantile::new(f64::NAN).is_err());
    /// # Ok::<(), gates_diff::error::GatesDiffError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, GatesDiffError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GatesDiffError::InvalidQuantile { value })
        }
    }

    /// Raw quantile value
    pub fn value(self) -> f64 {
        self.0
    }

    /// Share of diffs the summary is meant to show, in whole percent
    pub fn significant_percent(self) -> u32 {
        ((1.0 - self.0) * 100.0).round() as u32
    }
}

impl Default for SummaryQuantile {
    fn default() -> Self {
        Self(DEFAULT_SUMMARY_QUANTILE)
    }
}

/// A diff record that can be ranked for the summary
pub trait Significance {
    /// Absolute percentage of the governing metric
    fn change_magnitude(&self) -> f64;

    /// True if any tracked metric moved
    fn has_change(&self) -> bool;
}

impl Significance for DiffCircuit {
    fn change_magnitude(&self) -> f64 {
        self.circuit_size.magnitude()
    }

    fn has_change(&self) -> bool {
        !self.is_empty()
    }
}

impl Significance for DiffBrillig {
    fn change_magnitude(&self) -> f64 {
        self.opcodes.magnitude()
    }

    fn has_change(&self) -> bool {
        !self.is_empty()
    }
}

/// Minimum change magnitude required to appear in the summary
///
/// The magnitude found at index `floor((n - 1) * q)` once the diffs are
/// ordered by increasing magnitude; `0` for an empty collection.
pub fn change_threshold<T: Significance>(diffs: &[T], quantile: SummaryQuantile) -> f64 {
    let mut magnitudes: Vec<f64> = diffs.iter().map(Significance::change_magnitude).collect();
    if magnitudes.is_empty() {
        return 0.0;
    }
    magnitudes.sort_by(f64::total_cmp);

    let last = magnitudes.len() - 1;
    let index = ((last as f64 * quantile.value()).floor() as usize).min(last);
    magnitudes[index]
}

/// Summary and full views of one diff collection
#[derive(Debug)]
pub struct Summary<'a, T> {
    /// Most significant diffs, in their original order
    pub summary: Vec<&'a T>,
    /// Every diff
    pub full: &'a [T],
}

/// Select the diffs whose magnitude reaches the quantile threshold
///
/// # Examples
///
/// ```
/// use gates_diff::diff::{summarize, variation, DiffBrillig, SummaryQuantile};
///
/// let diff = |name: &str, current, previous| DiffBrillig {
///     name: name.to_string(),
///     opcodes: variation(current, previous),
/// };
/// let diffs = vec![diff("a", 200, 100), diff("b", 110, 100), diff("c", 101, 100)];
///
/// // magnitudes 100, 10, 1: the threshold sits at index floor(2 * 0.8) = 1
/// let view = summarize(&diffs, SummaryQuantile::new(0.8)?);
/// assert_eq!(view.summary.len(), 2);
/// assert_eq!(view.summary[0].name, "a");
/// assert_eq!(view.full.len(), 3);
/// # Ok::<(), gates_diff::error::GatesDiffError>(())
/// ```
pub fn summarize<T: Significance>(diffs: &[T], quantile: SummaryQuantile) -> Summary<'_, T> {
    let threshold = change_threshold(diffs, quantile);

    Summary {
        summary: diffs
            .iter()
            .filter(|diff| diff.change_magnitude() >= threshold && diff.has_change())
            .collect(),
        full: diffs,
    }
}

/// Contract view of the summary
///
/// The threshold is computed over the functions of all contracts together;
/// each contract keeps only its functions reaching it, and contracts left
/// without functions are dropped.
pub fn summarize_contracts(diffs: &[DiffContract], quantile: SummaryQuantile) -> Vec<DiffContract> {
    let functions: Vec<DiffCircuit> = diffs
        .iter()
        .flat_map(|contract| contract.functions.iter().cloned())
        .collect();
    let threshold = change_threshold(&functions, quantile);

    diffs
        .iter()
        .map(|contract| DiffContract {
            name: contract.name.clone(),
            functions: contract
                .functions
                .iter()
                .filter(|f| f.change_magnitude() >= threshold && f.has_change())
                .cloned()
                .collect(),
        })
        .filter(|contract| !contract.functions.is_empty())
        .collect()
}
