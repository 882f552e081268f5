//! Webhook delivery of price-change messages.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Serialize;

use super::notifier_traits::Notifier;
use crate::sync::PriceChange;

/// Color for a rising price (green).
const COLOR_UP: u32 = 0x2ECC71;
/// Color for a falling or unchanged price (red).
const COLOR_DOWN: u32 = 0xE74C3C;

/// Delivery timeout; notification is best-effort and must not stall a refresh.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

const FOOTER_TEXT: &str = "Skinfolio price sync";

// ============================================================================
// Webhook payload (Discord-compatible embed)
// ============================================================================

#[derive(Debug, Serialize)]
struct WebhookPayload {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    color: u32,
    fields: Vec<EmbedField>,
    footer: EmbedFooter,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: String,
    value: String,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct EmbedFooter {
    text: String,
}

/// Build the outbound message for a price change.
fn build_payload(change: &PriceChange) -> WebhookPayload {
    let color = if change.is_increase() {
        COLOR_UP
    } else {
        COLOR_DOWN
    };

    let old = change
        .old_price
        .map(|p| format!("${}", p))
        .unwrap_or_else(|| "—".to_string());

    WebhookPayload {
        embeds: vec![Embed {
            title: format!("Price update: {}", change.item_name),
            color,
            fields: vec![
                EmbedField {
                    name: "Old price".to_string(),
                    value: old,
                    inline: true,
                },
                EmbedField {
                    name: "New price".to_string(),
                    value: format!("${}", change.new_price),
                    inline: true,
                },
                EmbedField {
                    name: "Change".to_string(),
                    value: format!(
                        "{} ({}%)",
                        change.difference().normalize(),
                        change.percent_change().normalize()
                    ),
                    inline: true,
                },
            ],
            footer: EmbedFooter {
                text: FOOTER_TEXT.to_string(),
            },
        }],
    }
}

/// Posts price-change embeds to a per-holding webhook endpoint.
pub struct WebhookNotifier {
    client: Client,
}

impl WebhookNotifier {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for WebhookNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_price_change(&self, endpoint: &str, change: &PriceChange) {
        let payload = build_payload(change);

        match self.client.post(endpoint).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Delivered price change for '{}'", change.item_name);
            }
            Ok(response) => {
                warn!(
                    "Webhook for '{}' answered {}",
                    change.item_name,
                    response.status()
                );
            }
            Err(e) => {
                warn!("Webhook delivery for '{}' failed: {}", change.item_name, e);
            }
        }
    }
}
