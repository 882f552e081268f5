use async_trait::async_trait;

use super::snapshot_model::PortfolioSnapshot;
use crate::errors::Result;

/// Append-only contract for portfolio snapshots.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    async fn append(&self, snapshot: &PortfolioSnapshot) -> Result<()>;

    /// Snapshot history for an owner, ordered by timestamp ascending.
    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<PortfolioSnapshot>>;
}
