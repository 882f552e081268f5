//! Holdings module - owner-specific instances of catalog items.

mod holdings_model;
mod holdings_traits;

pub use holdings_model::Holding;
pub use holdings_traits::HoldingRepositoryTrait;
