use async_trait::async_trait;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::holdings;
use crate::schema::holdings::dsl::*;

use super::model::HoldingDB;
use skinfolio_core::errors::Result;
use skinfolio_core::holdings::{Holding, HoldingRepositoryTrait};

/// Repository for holdings.
pub struct HoldingRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl HoldingRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    fn list_by_owner(&self, owner: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        let results = holdings
            .select(HoldingDB::as_select())
            .filter(owner_id.eq(owner))
            .order(id.asc())
            .load::<HoldingDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Holding::from).collect())
    }

    fn get_for_owner(&self, holding_id: &str, owner: &str) -> Result<Holding> {
        let mut conn = get_connection(&self.pool)?;

        let holding = holdings
            .select(HoldingDB::as_select())
            .filter(id.eq(holding_id))
            .filter(owner_id.eq(owner))
            .first::<HoldingDB>(&mut conn)
            .into_core()?;

        Ok(holding.into())
    }

    async fn update_price(&self, holding_id: &str, price: Decimal) -> Result<()> {
        let id_owned = holding_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::update(holdings::table.find(&id_owned))
                    .set(current_price.eq(Some(price.to_string())))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn update_price_for_item(&self, item: &str, price: Decimal) -> Result<usize> {
        let item_owned = item.to_string();

        self.writer
            .exec(move |conn| {
                diesel::update(holdings::table.filter(item_id.eq(&item_owned)))
                    .set(current_price.eq(Some(price.to_string())))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
