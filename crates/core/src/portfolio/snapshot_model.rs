//! Portfolio snapshot domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::Holding;

/// Aggregate value of one owner's portfolio at a point in time.
///
/// Append-only: one row per refresh invocation, keyed by (owner, timestamp).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub owner_id: String,
    pub timestamp: DateTime<Utc>,
    /// Sum of buy prices across holdings.
    pub invested: Decimal,
    /// Sum of current values across holdings.
    pub value: Decimal,
    /// `value - invested`.
    pub profit: Decimal,
}

impl PortfolioSnapshot {
    /// Aggregate the given holdings. The cash sentinel's holdings must be
    /// filtered out by the caller; everything passed in is counted.
    pub fn from_holdings(
        owner_id: &str,
        holdings: &[&Holding],
        timestamp: DateTime<Utc>,
    ) -> Self {
        let invested: Decimal = holdings.iter().map(|h| h.invested()).sum();
        let value: Decimal = holdings.iter().map(|h| h.market_value()).sum();

        Self {
            owner_id: owner_id.to_string(),
            timestamp,
            invested,
            value,
            profit: value - invested,
        }
    }
}
