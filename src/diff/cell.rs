//! Single metric variation between two snapshots

use serde::{Serialize, Serializer};

/// Comparison of one metric between the reference and the current snapshot
///
/// `current == previous + delta` always holds: report metrics are `u64`, so
/// the delta is kept as `i128` and never overflows. When `previous` is zero
/// the percentage is `+∞` whatever the sign of `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiffCell {
    /// Value in the reference snapshot
    pub previous: u64,
    /// Value in the current snapshot
    pub current: u64,
    /// `current - previous`
    pub delta: i128,
    /// Relative change in percent
    #[serde(serialize_with = "serialize_percentage")]
    pub percentage: f64,
}

/// Direction of a change, used for colouring and markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Metric grew
    Increase,
    /// Metric shrank
    Decrease,
    /// Metric did not move
    Unchanged,
}

impl DiffCell {
    /// Cell with every field at zero, used as a placeholder for absent data
    pub const ZERO: DiffCell = DiffCell {
        previous: 0,
        current: 0,
        delta: 0,
        percentage: 0.0,
    };

    /// True if the metric did not change
    pub fn is_unchanged(&self) -> bool {
        self.delta == 0
    }

    /// Absolute relative change, the ranking key of the summary
    pub fn magnitude(&self) -> f64 {
        self.percentage.abs()
    }

    /// Direction of the change
    pub fn trend(&self) -> Trend {
        match self.delta {
            d if d > 0 => Trend::Increase,
            d if d < 0 => Trend::Decrease,
            _ => Trend::Unchanged,
        }
    }
}

/// Compute the variation of a metric from `previous` to `current`
///
/// # Examples
///
/// ```
/// use gates_diff::diff::variation;
///
/// let cell = variation(8, 10);
/// assert_eq!(cell.delta, -2);
/// assert_eq!(cell.percentage, -20.0);
///
/// assert_eq!(variation(5, 0).percentage, f64::INFINITY);
/// ```
pub fn variation(current: u64, previous: u64) -> DiffCell {
    let delta = i128::from(current) - i128::from(previous);

    DiffCell {
        previous,
        current,
        delta,
        percentage: if previous != 0 {
            (100.0 * delta as f64) / previous as f64
        } else {
            f64::INFINITY
        },
    }
}

fn serialize_percentage<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}
