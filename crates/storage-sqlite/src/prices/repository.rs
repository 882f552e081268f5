use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::price_records;
use crate::schema::price_records::dsl::*;

use super::model::PriceRecordDB;
use skinfolio_core::errors::Result;
use skinfolio_core::sync::{PriceRecord, PriceRepositoryTrait};

/// Repository for the append-only price history.
pub struct PriceRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PriceRepositoryTrait for PriceRepository {
    async fn append(&self, record: &PriceRecord) -> Result<()> {
        let row: PriceRecordDB = record.clone().into();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(price_records::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    fn list_for_item(&self, market_param: &str, item: &str) -> Result<Vec<PriceRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let results = price_records
            .select(PriceRecordDB::as_select())
            .filter(market.eq(market_param))
            .filter(item_id.eq(item))
            .order(timestamp.asc())
            .load::<PriceRecordDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(PriceRecord::from).collect())
    }
}
