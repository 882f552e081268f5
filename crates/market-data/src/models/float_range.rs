//! Wear float range constraints for provider queries.

use serde::{Deserialize, Serialize};

/// Inclusive wear float range passed to a provider query.
///
/// Wear floats live in `[0, 1]`. A range derived from a specific holding is
/// always anchored at `0.0` and capped at the holding's float rounded up to
/// two decimals, so the provider search matches listings at least as good as
/// the owned item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl FloatRange {
    /// Derive the query range for a holding's float value.
    ///
    /// The upper bound is the two-decimal ceiling of `value`: for any
    /// `value ∈ [0, 1)` it satisfies `max >= value` and `max < value + 0.01`.
    pub fn for_value(value: f64) -> Self {
        Self {
            min: 0.0,
            max: (value * 100.0).ceil() / 100.0,
        }
    }
}
