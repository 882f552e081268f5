use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::catalog_items;
use crate::schema::catalog_items::dsl::*;

use super::model::CatalogItemDB;
use skinfolio_core::catalog::{CatalogItem, CatalogRepositoryTrait, ItemType};
use skinfolio_core::errors::Result;

/// Repository for catalog items.
pub struct CatalogRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl CatalogRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CatalogRepositoryTrait for CatalogRepository {
    fn get_by_id(&self, catalog_item_id: &str) -> Result<CatalogItem> {
        let mut conn = get_connection(&self.pool)?;

        let item = catalog_items
            .select(CatalogItemDB::as_select())
            .find(catalog_item_id)
            .first::<CatalogItemDB>(&mut conn)
            .into_core()?;

        Ok(item.into())
    }

    fn get_by_slug(&self, slug_param: &str) -> Result<CatalogItem> {
        let mut conn = get_connection(&self.pool)?;

        let item = catalog_items
            .select(CatalogItemDB::as_select())
            .filter(slug.eq(slug_param))
            .first::<CatalogItemDB>(&mut conn)
            .into_core()?;

        Ok(item.into())
    }

    fn list_by_types(&self, types: &[ItemType]) -> Result<Vec<CatalogItem>> {
        let mut conn = get_connection(&self.pool)?;

        let type_names: Vec<&str> = types.iter().map(ItemType::as_str).collect();

        let results = catalog_items
            .select(CatalogItemDB::as_select())
            .filter(item_type.eq_any(type_names))
            .order(name.asc())
            .load::<CatalogItemDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(CatalogItem::from).collect())
    }

    async fn update_price(
        &self,
        catalog_item_id: &str,
        price: Decimal,
        as_of: DateTime<Utc>,
    ) -> Result<()> {
        let id_owned = catalog_item_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::update(catalog_items::table.find(&id_owned))
                    .set((
                        current_price.eq(Some(price.to_string())),
                        last_update.eq(Some(as_of.to_rfc3339())),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }
}
