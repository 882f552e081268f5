//! Portfolio module - per-owner aggregate snapshots.

mod snapshot_model;
mod snapshot_traits;

pub use snapshot_model::PortfolioSnapshot;
pub use snapshot_traits::SnapshotRepositoryTrait;
