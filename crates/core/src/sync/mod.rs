//! Price synchronization engine.
//!
//! Turns a stored catalog/holding record into a canonical market query,
//! fetches a live price, normalizes it, persists it, and propagates it to
//! dependent aggregates.

mod normalizer;
mod pacer;
mod price_model;
mod query_builder;
mod sync_service;

#[cfg(test)]
mod sync_service_tests;

pub use normalizer::normalize_listing;
pub use pacer::{FixedDelayPacer, NoopPacer, Pacer};
pub use price_model::{ItemOutcome, PriceChange, PriceRecord, PriceRepositoryTrait, SkipReason};
pub use query_builder::{build_query, MarketQuery};
pub use sync_service::{PriceSyncService, PriceSyncServiceTrait, SyncConfig};
