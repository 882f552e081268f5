//! Listing-to-price-record normalization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use skinfolio_market_data::{Listing, MarketError};

use super::price_model::PriceRecord;
use crate::constants::PRICE_DECIMAL_PRECISION;

/// Convert a raw listing into a canonical price record.
///
/// Requires the minor-currency-unit price; the conversion is
/// `minor / 100` rounded to two decimals. A listing without a usable price
/// is rejected as invalid.
pub fn normalize_listing(
    listing: &Listing,
    item_id: &str,
    market: &str,
    timestamp: DateTime<Utc>,
) -> Result<PriceRecord, MarketError> {
    let cents = listing.price_cents.ok_or_else(|| {
        MarketError::InvalidListing(format!(
            "listing for '{}' has no price",
            listing.market_hash_name
        ))
    })?;

    if cents < 0 {
        return Err(MarketError::InvalidListing(format!(
            "listing for '{}' has negative price {}",
            listing.market_hash_name, cents
        )));
    }

    let price = (Decimal::from(cents) / Decimal::from(100)).round_dp(PRICE_DECIMAL_PRECISION);

    Ok(PriceRecord {
        market: market.to_string(),
        item_id: item_id.to_string(),
        timestamp,
        price,
    })
}
