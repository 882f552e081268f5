//! Skinfolio Market Data Crate
//!
//! This crate provides provider-agnostic market price fetching for tradable
//! CS2 items (skins, knives, gloves, charms, cases).
//!
//! # Overview
//!
//! The market data crate supports:
//! - A capability trait for pluggable listings providers
//! - Phase detection and filtering for Doppler-style items
//! - Wear float range constraints on provider queries
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Domain Layer   | --> |   search term    |  (canonical market name)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | phase extraction |  (term without phase token)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  PriceProvider   |  (CSFloat, ...)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |     Listing      |  (cheapest live sell offer)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Listing`] - A live sell offer with a minor-currency-unit price
//! - [`FloatRange`] - Wear float constraint derived from a holding's float value
//! - [`Phase`] - Enumerated phase vocabulary with term extraction
//! - [`PriceProvider`] - The provider capability trait

pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{extract_phase, FloatRange, Listing, Phase, ListingType};

// Re-export provider types
pub use provider::csfloat::CsfloatProvider;
pub use provider::PriceProvider;

// Re-export error types
pub use errors::{FailureKind, MarketError};
