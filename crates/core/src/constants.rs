/// Reserved slug of the cash sentinel catalog item.
pub const CASH_ITEM_SLUG: &str = "cash";

/// Market key recorded on price rows when no provider override is configured.
pub const DEFAULT_MARKET_ID: &str = "CSFLOAT";

/// Minimum age, in hours, before a catalog item's price is re-fetched.
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

/// Pause between provider calls within one refresh invocation, in milliseconds.
pub const INTER_ITEM_DELAY_MS: u64 = 1000;

/// Decimal precision for persisted prices.
pub const PRICE_DECIMAL_PRECISION: u32 = 2;
