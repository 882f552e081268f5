//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`MarketError`]: The main error enum for all market price operations
//! - [`FailureKind`]: Classification consumed by the sync engine's skip accounting

use thiserror::Error;

/// Errors that can occur while fetching a market price.
///
/// Each variant is classified into a [`FailureKind`] via the
/// [`failure_kind`](Self::failure_kind) method, which determines how the sync
/// engine records the per-item outcome.
#[derive(Error, Debug)]
pub enum MarketError {
    /// No matching listing survived the provider-side and client-side filters.
    /// This is normal and frequent for rarely traded items.
    #[error("No listing found for: {0}")]
    NoListingFound(String),

    /// A listing was fetched but is malformed or missing a required field.
    #[error("Invalid listing: {0}")]
    InvalidListing(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success response, bad body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Coarse classification of a [`MarketError`].
///
/// The sync engine treats every kind as a per-item skip; the kind only
/// determines the recorded skip reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// No price is available for the query.
    NotFound,
    /// The provider answered, but the payload is unusable.
    Invalid,
    /// The provider could not be reached or refused the request.
    Transport,
}

impl MarketError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use skinfolio_market_data::errors::{FailureKind, MarketError};
    ///
    /// let error = MarketError::NoListingFound("AK-47 | Redline".to_string());
    /// assert_eq!(error.failure_kind(), FailureKind::NotFound);
    ///
    /// let error = MarketError::RateLimited { provider: "CSFLOAT".to_string() };
    /// assert_eq!(error.failure_kind(), FailureKind::Transport);
    /// ```
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::NoListingFound(_) => FailureKind::NotFound,

            Self::InvalidListing(_) => FailureKind::Invalid,

            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::Network(_) => FailureKind::Transport,
        }
    }
}
