//! Price provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketError;
use crate::models::{FloatRange, Listing};

/// Trait for market listings providers.
///
/// Implement this trait to add support for a new listings source. The sync
/// engine depends only on this trait, so providers can be substituted freely
/// (including test fakes).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use skinfolio_market_data::{FloatRange, Listing, MarketError, PriceProvider};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl PriceProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn fetch_price(
///         &self,
///         term: &str,
///         float_range: Option<FloatRange>,
///     ) -> Result<Listing, MarketError> {
///         // ... query the provider, return the cheapest matching listing
///         # unimplemented!()
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "CSFLOAT". Used for logging and as
    /// the market key on persisted price records.
    fn id(&self) -> &'static str;

    /// Fetch the cheapest live listing matching the search term.
    ///
    /// # Arguments
    ///
    /// * `term` - The canonical market search term. May carry a phase token;
    ///   the provider detects and strips it, filtering on the phase instead.
    /// * `float_range` - Optional wear float constraint for the search.
    ///
    /// # Returns
    ///
    /// The minimum-price buyable listing, or a [`MarketError`] when no usable
    /// listing exists or the provider cannot be reached.
    async fn fetch_price(
        &self,
        term: &str,
        float_range: Option<FloatRange>,
    ) -> Result<Listing, MarketError>;
}
