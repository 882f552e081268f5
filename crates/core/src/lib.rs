//! Skinfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the price synchronization engine and the domain model
//! around it. It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod catalog;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod notify;
pub mod portfolio;
pub mod sync;

// Re-export common types
pub use catalog::*;
pub use holdings::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
