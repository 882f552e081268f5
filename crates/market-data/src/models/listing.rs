//! Market listing model.

use serde::{Deserialize, Serialize};

/// How a listing is sold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    /// Immediately buyable at the listed price.
    BuyNow,
    /// Auction; ignored when selecting a price.
    Auction,
}

/// A live sell offer returned by a market provider.
///
/// The price stays in minor currency units and stays optional: the price
/// normalizer owns the missing-price validation, not the provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Listing {
    /// Price in minor currency units (e.g. cents).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,

    /// Canonical market name of the listed item.
    pub market_hash_name: String,

    /// Provider-reported phase label, when the item has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Sale mechanism of the listing.
    pub listing_type: ListingType,

    /// Source of the listing (CSFLOAT, ...).
    pub source: String,
}

impl Listing {
    /// Create a buy-now listing with the minimal required fields.
    pub fn buy_now(price_cents: i64, market_hash_name: String, source: String) -> Self {
        Self {
            price_cents: Some(price_cents),
            market_hash_name,
            phase: None,
            listing_type: ListingType::BuyNow,
            source,
        }
    }
}
