use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::catalog_model::{CatalogItem, ItemType};
use crate::errors::Result;

/// Read/write contract for catalog items.
///
/// Reads go against the pooled connections; the price upsert is the only
/// mutation the sync engine performs on a catalog item.
#[async_trait]
pub trait CatalogRepositoryTrait: Send + Sync {
    fn get_by_id(&self, item_id: &str) -> Result<CatalogItem>;
    fn get_by_slug(&self, slug: &str) -> Result<CatalogItem>;
    fn list_by_types(&self, types: &[ItemType]) -> Result<Vec<CatalogItem>>;

    /// Upsert the item's current price and last-update timestamp.
    async fn update_price(
        &self,
        item_id: &str,
        price: Decimal,
        as_of: DateTime<Utc>,
    ) -> Result<()>;
}
