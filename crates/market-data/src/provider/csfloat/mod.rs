//! CSFloat market provider implementation.
//!
//! This module fetches live sell listings from the CSFloat listings API:
//! - Listings search via /listings, sorted ascending by price
//! - Buy-now listings only, capped at one page of 50 results
//! - Optional wear float range and phase filters
//!
//! API documentation: https://docs.csfloat.com/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketError;
use crate::models::{extract_phase, FloatRange, Listing, ListingType, Phase};
use crate::provider::PriceProvider;

const BASE_URL: &str = "https://csfloat.com/api/v1";
const PROVIDER_ID: &str = "CSFLOAT";

/// Result-count cap per search; one page is enough for a minimum-price pick
/// on an ascending sort.
const PAGE_LIMIT: u32 = 50;

/// Provider call timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /listings. The API has returned both a bare array and a
/// wrapped object over time, so both shapes are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingsResponse {
    Wrapped {
        #[serde(default)]
        data: Vec<ListingEntry>,
    },
    Bare(Vec<ListingEntry>),
}

impl ListingsResponse {
    fn into_entries(self) -> Vec<ListingEntry> {
        match self {
            ListingsResponse::Wrapped { data } => data,
            ListingsResponse::Bare(entries) => entries,
        }
    }
}

/// Individual listing entry.
#[derive(Debug, Deserialize)]
struct ListingEntry {
    /// Price in cents
    price: Option<i64>,
    /// Sale mechanism: "buy_now" or "auction"
    #[serde(rename = "type")]
    listing_type: Option<String>,
    /// The listed item
    item: Option<ItemEntry>,
}

/// Nested item descriptor on a listing entry.
#[derive(Debug, Deserialize)]
struct ItemEntry {
    /// Canonical market name
    market_hash_name: Option<String>,
    /// Phase label for Doppler-style items
    phase: Option<String>,
}

/// Error response body.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

// ============================================================================
// CsfloatProvider
// ============================================================================

/// CSFloat listings provider.
///
/// Queries buy-now listings sorted ascending by price and returns the cheapest
/// candidate surviving auction and phase filtering.
pub struct CsfloatProvider {
    client: Client,
    api_key: Option<String>,
}

impl CsfloatProvider {
    /// Create a new CSFloat provider. The API key is optional; unauthenticated
    /// requests are allowed at a lower rate.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request to the CSFloat API.
    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String, MarketError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        let mut request = self.client.get(&url);

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", key);
        }

        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("CSFloat request: {} with {} params", endpoint, params.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketError::Network(e)
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(message) = error_resp.message {
                    return Err(MarketError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message,
                    });
                }
            }

            return Err(MarketError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

/// Pick the cheapest usable candidate from a page of listings.
///
/// Auction entries are dropped. With an active phase filter, entries whose
/// reported phase does not match are dropped too. Ties on the minimum price
/// keep the first candidate encountered, in provider order.
fn select_candidate(entries: Vec<ListingEntry>, phase: Option<Phase>) -> Option<ListingEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.listing_type.as_deref() == Some("buy_now"))
        .filter(|entry| match phase {
            None => true,
            Some(target) => entry
                .item
                .as_ref()
                .and_then(|item| item.phase.as_deref())
                .is_some_and(|label| target.matches(label)),
        })
        .fold(None, |best: Option<ListingEntry>, entry| match best {
            Some(current)
                if entry.price.unwrap_or(i64::MAX) < current.price.unwrap_or(i64::MAX) =>
            {
                Some(entry)
            }
            Some(current) => Some(current),
            None => Some(entry),
        })
}

#[async_trait]
impl PriceProvider for CsfloatProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_price(
        &self,
        term: &str,
        float_range: Option<FloatRange>,
    ) -> Result<Listing, MarketError> {
        let (search_term, phase) = extract_phase(term);

        let mut params: Vec<(&str, String)> = vec![
            ("market_hash_name", search_term.clone()),
            ("limit", PAGE_LIMIT.to_string()),
            ("sort_by", "lowest_price".to_string()),
            ("type", "buy_now".to_string()),
        ];

        if let Some(range) = float_range {
            params.push(("min_float", range.min.to_string()));
            params.push(("max_float", range.max.to_string()));
        }

        if let Some(target) = phase {
            params.push(("phase", target.as_str().to_string()));
        }

        let text = self.fetch("/listings", &params).await?;

        let response: ListingsResponse =
            serde_json::from_str(&text).map_err(|e| MarketError::InvalidListing(format!(
                "Failed to parse listings response: {}",
                e
            )))?;

        let entries = response.into_entries();
        if entries.is_empty() {
            return Err(MarketError::NoListingFound(search_term));
        }

        let candidate = match select_candidate(entries, phase) {
            Some(entry) => entry,
            None => {
                warn!(
                    term = %search_term,
                    phase = phase.map(|p| p.as_str()),
                    "no buyable candidate survived filtering"
                );
                return Err(MarketError::NoListingFound(search_term));
            }
        };

        let item = candidate.item.unwrap_or(ItemEntry {
            market_hash_name: None,
            phase: None,
        });

        Ok(Listing {
            price_cents: candidate.price,
            market_hash_name: item.market_hash_name.unwrap_or(search_term),
            phase: item.phase,
            listing_type: ListingType::BuyNow,
            source: PROVIDER_ID.to_string(),
        })
    }
}
