use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::portfolio_snapshots;
use crate::schema::portfolio_snapshots::dsl::*;

use super::model::PortfolioSnapshotDB;
use skinfolio_core::errors::Result;
use skinfolio_core::portfolio::{PortfolioSnapshot, SnapshotRepositoryTrait};

/// Repository for the append-only portfolio snapshot history.
pub struct SnapshotRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    async fn append(&self, snapshot: &PortfolioSnapshot) -> Result<()> {
        let row: PortfolioSnapshotDB = snapshot.clone().into();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(portfolio_snapshots::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    fn list_for_owner(&self, owner: &str) -> Result<Vec<PortfolioSnapshot>> {
        let mut conn = get_connection(&self.pool)?;

        let results = portfolio_snapshots
            .select(PortfolioSnapshotDB::as_select())
            .filter(owner_id.eq(owner))
            .order(timestamp.asc())
            .load::<PortfolioSnapshotDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(PortfolioSnapshot::from).collect())
    }
}
