use async_trait::async_trait;

use crate::sync::PriceChange;

/// Fire-and-forget price-change delivery.
///
/// Implementations must never propagate a failure: delivery problems are
/// logged and swallowed so a refresh outcome is unaffected.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_price_change(&self, endpoint: &str, change: &PriceChange);
}
