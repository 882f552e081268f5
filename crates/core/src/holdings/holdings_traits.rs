use async_trait::async_trait;
use rust_decimal::Decimal;

use super::holdings_model::Holding;
use crate::errors::Result;

/// Read/write contract for holdings.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Holding>>;

    /// Fetch one holding, scoped to its owner.
    fn get_for_owner(&self, holding_id: &str, owner_id: &str) -> Result<Holding>;

    /// Set the current price of a single holding.
    async fn update_price(&self, holding_id: &str, price: Decimal) -> Result<()>;

    /// Push a catalog-driven price to every holding referencing the item.
    /// Returns the number of holdings updated.
    async fn update_price_for_item(&self, item_id: &str, price: Decimal) -> Result<usize>;
}
