//! Price records, change entries, and per-item refresh outcomes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One observed market price for a catalog item.
///
/// Append-only, keyed by (market, item, timestamp); corrections are new rows
/// with later timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// Market the price was observed on (e.g. CSFLOAT).
    pub market: String,
    pub item_id: String,
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}

/// Append-only contract for price history.
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    async fn append(&self, record: &PriceRecord) -> Result<()>;

    /// Price history of an item on a market, ordered by timestamp ascending.
    fn list_for_item(&self, market: &str, item_id: &str) -> Result<Vec<PriceRecord>>;
}

/// A successfully refreshed item's old-vs-new price delta.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub item_id: String,
    pub item_name: String,
    pub old_price: Option<Decimal>,
    pub new_price: Decimal,
}

impl PriceChange {
    /// Absolute change; a never-priced item counts as changing from zero.
    pub fn difference(&self) -> Decimal {
        self.new_price - self.old_price.unwrap_or(Decimal::ZERO)
    }

    /// Percentage change, rounded to two decimals.
    ///
    /// Equal old and new prices (including both zero) give 0; a price
    /// appearing where there was none (or zero) gives 100.
    pub fn percent_change(&self) -> Decimal {
        let old = self.old_price.unwrap_or(Decimal::ZERO);

        if old.is_zero() {
            if self.new_price.is_zero() {
                Decimal::ZERO
            } else {
                dec!(100)
            }
        } else {
            ((self.new_price - old) / old * dec!(100)).round_dp(2)
        }
    }

    /// True when the price moved up.
    pub fn is_increase(&self) -> bool {
        self.difference() > Decimal::ZERO
    }
}

/// Why an item was skipped during a refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The cash sentinel is never priced.
    CashSentinel,

    /// The catalog freshness guard found a recent enough price.
    FreshPrice,

    /// No matching listing after provider and client-side filtering.
    NoListing,

    /// The provider answered with an unusable or priceless payload.
    MalformedListing,

    /// The provider could not be reached or refused the request.
    Transport(String),
}

/// Terminal outcome of one item within a refresh invocation.
///
/// Every item ends in exactly one of these; a skip never aborts the batch.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemOutcome {
    /// The full pipeline ran: record appended, prices upserted.
    Persisted(PriceChange),

    /// The item was skipped with a recorded reason.
    Skipped {
        item_id: String,
        reason: SkipReason,
    },
}

impl ItemOutcome {
    /// The change entry, when this outcome produced one.
    pub fn into_change(self) -> Option<PriceChange> {
        match self {
            ItemOutcome::Persisted(change) => Some(change),
            ItemOutcome::Skipped { .. } => None,
        }
    }
}
