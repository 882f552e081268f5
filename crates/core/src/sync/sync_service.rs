use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

use skinfolio_market_data::{FailureKind, MarketError, PriceProvider};

use super::normalizer::normalize_listing;
use super::pacer::Pacer;
use super::price_model::{
    ItemOutcome, PriceChange, PriceRecord, PriceRepositoryTrait, SkipReason,
};
use super::query_builder::build_query;
use crate::catalog::{CatalogItem, CatalogRepositoryTrait, ItemType};
use crate::constants::{DEFAULT_MARKET_ID, FRESHNESS_WINDOW_HOURS};
use crate::errors::Result;
use crate::holdings::{Holding, HoldingRepositoryTrait};
use crate::notify::Notifier;
use crate::portfolio::{PortfolioSnapshot, SnapshotRepositoryTrait};

/// Catalog types refreshed when no filter is given.
const DEFAULT_REFRESH_TYPES: [ItemType; 2] = [ItemType::Skin, ItemType::Case];

/// Configuration for the sync engine, passed in at construction time.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Market key recorded on persisted price rows.
    pub market_id: String,
    /// Minimum age before a catalog item's price is re-fetched.
    pub freshness_window: Duration,
    /// Whether a portfolio refresh that priced nothing still appends a
    /// snapshot. Totals remain computable from stored prices either way.
    pub snapshot_when_empty: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            market_id: DEFAULT_MARKET_ID.to_string(),
            freshness_window: Duration::hours(FRESHNESS_WINDOW_HOURS),
            snapshot_when_empty: true,
        }
    }
}

/// The price synchronization operations.
#[async_trait]
pub trait PriceSyncServiceTrait: Send + Sync {
    /// Refresh every holding of an owner, then append a portfolio snapshot.
    /// Returns one change entry per successfully priced item; per-item
    /// failures are recorded and skipped, never raised.
    async fn refresh_owner_portfolio(&self, owner_id: &str) -> Result<Vec<PriceChange>>;

    /// Refresh catalog items of the given type (default: skins and cases),
    /// honoring the freshness guard. Returns the updated items.
    async fn refresh_catalog(&self, type_filter: Option<ItemType>) -> Result<Vec<CatalogItem>>;

    /// Refresh exactly one catalog item. An unknown id is a `NotFound`
    /// database error; a failed fetch is `Ok(None)`.
    async fn refresh_catalog_item(&self, item_id: &str) -> Result<Option<PriceChange>>;

    /// Refresh exactly one holding, pricing the owner's specific
    /// float/phase/variant. An unknown holding is a `NotFound` database
    /// error; a failed fetch is `Ok(None)`.
    async fn refresh_holding(
        &self,
        holding_id: &str,
        owner_id: &str,
    ) -> Result<Option<PriceChange>>;
}

/// Drives the refresh pipeline: query building, provider fetch,
/// normalization, persistence, and best-effort notification.
///
/// Items are processed sequentially; the pacer runs between provider calls.
/// Only persistence faults abort an invocation.
pub struct PriceSyncService {
    catalog_repository: Arc<dyn CatalogRepositoryTrait>,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    price_repository: Arc<dyn PriceRepositoryTrait>,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    provider: Arc<dyn PriceProvider>,
    notifier: Arc<dyn Notifier>,
    pacer: Arc<dyn Pacer>,
    config: SyncConfig,
}

impl PriceSyncService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog_repository: Arc<dyn CatalogRepositoryTrait>,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        price_repository: Arc<dyn PriceRepositoryTrait>,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        provider: Arc<dyn PriceProvider>,
        notifier: Arc<dyn Notifier>,
        pacer: Arc<dyn Pacer>,
        config: SyncConfig,
    ) -> Self {
        Self {
            catalog_repository,
            holding_repository,
            price_repository,
            snapshot_repository,
            provider,
            notifier,
            pacer,
            config,
        }
    }

    fn skip_reason(error: MarketError) -> SkipReason {
        match error.failure_kind() {
            FailureKind::NotFound => SkipReason::NoListing,
            FailureKind::Invalid => SkipReason::MalformedListing,
            FailureKind::Transport => SkipReason::Transport(error.to_string()),
        }
    }

    /// Run the fetch half of the pipeline for one item: build the query,
    /// call the provider, normalize. Every failure maps to a skip reason.
    async fn fetch_record(
        &self,
        item: &CatalogItem,
        holding: Option<&Holding>,
    ) -> std::result::Result<PriceRecord, SkipReason> {
        let query = build_query(item, holding);
        debug!("Fetching price for '{}' (query '{}')", item.name, query.term);

        let listing = self
            .provider
            .fetch_price(&query.term, query.float_range)
            .await
            .map_err(Self::skip_reason)?;

        normalize_listing(&listing, &item.id, &self.config.market_id, Utc::now()).map_err(|e| {
            warn!("Malformed listing for '{}': {}", item.name, e);
            SkipReason::MalformedListing
        })
    }

    /// Persist a catalog-driven price: append the record, upsert the catalog
    /// item, push the price to every holding referencing it.
    async fn persist_catalog_price(
        &self,
        item: &CatalogItem,
        record: &PriceRecord,
    ) -> Result<PriceChange> {
        self.price_repository.append(record).await?;
        self.catalog_repository
            .update_price(&item.id, record.price, record.timestamp)
            .await?;
        self.holding_repository
            .update_price_for_item(&item.id, record.price)
            .await?;

        Ok(PriceChange {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            old_price: item.current_price,
            new_price: record.price,
        })
    }
}

#[async_trait]
impl PriceSyncServiceTrait for PriceSyncService {
    async fn refresh_owner_portfolio(&self, owner_id: &str) -> Result<Vec<PriceChange>> {
        let holdings = self.holding_repository.list_by_owner(owner_id)?;
        info!(
            "Refreshing portfolio for owner {} ({} holdings)",
            owner_id,
            holdings.len()
        );

        let mut outcomes: Vec<ItemOutcome> = Vec::with_capacity(holdings.len());
        let mut cash_items: HashSet<String> = HashSet::new();
        let mut fetched_any = false;

        for holding in &holdings {
            let item = self.catalog_repository.get_by_id(&holding.item_id)?;

            if item.is_cash() {
                cash_items.insert(item.id.clone());
                outcomes.push(ItemOutcome::Skipped {
                    item_id: item.id,
                    reason: SkipReason::CashSentinel,
                });
                continue;
            }

            if fetched_any {
                self.pacer.pause().await;
            }
            fetched_any = true;

            match self.fetch_record(&item, Some(holding)).await {
                Err(reason) => {
                    warn!("Skipping '{}': {:?}", item.name, reason);
                    outcomes.push(ItemOutcome::Skipped {
                        item_id: item.id,
                        reason,
                    });
                }
                Ok(record) => {
                    let change = self.persist_catalog_price(&item, &record).await?;
                    if let Some(url) = &holding.webhook_url {
                        self.notifier.send_price_change(url, &change).await;
                    }
                    outcomes.push(ItemOutcome::Persisted(change));
                }
            }
        }

        let changes: Vec<PriceChange> = outcomes
            .into_iter()
            .filter_map(ItemOutcome::into_change)
            .collect();

        info!(
            "Portfolio refresh for owner {} priced {} of {} holdings",
            owner_id,
            changes.len(),
            holdings.len()
        );

        if !changes.is_empty() || self.config.snapshot_when_empty {
            // Re-read so the snapshot sees the prices written above.
            let holdings = self.holding_repository.list_by_owner(owner_id)?;
            let counted: Vec<&Holding> = holdings
                .iter()
                .filter(|h| !cash_items.contains(&h.item_id))
                .collect();
            let snapshot = PortfolioSnapshot::from_holdings(owner_id, &counted, Utc::now());
            debug!(
                "Appending snapshot for owner {}: invested {}, value {}",
                owner_id, snapshot.invested, snapshot.value
            );
            self.snapshot_repository.append(&snapshot).await?;
        }

        Ok(changes)
    }

    async fn refresh_catalog(&self, type_filter: Option<ItemType>) -> Result<Vec<CatalogItem>> {
        let types: Vec<ItemType> = match type_filter {
            Some(item_type) => vec![item_type],
            None => DEFAULT_REFRESH_TYPES.to_vec(),
        };

        let items = self.catalog_repository.list_by_types(&types)?;
        info!("Refreshing catalog prices for {} items", items.len());

        let mut outcomes: Vec<ItemOutcome> = Vec::with_capacity(items.len());
        let mut updated = Vec::new();
        let mut fetched_any = false;

        for item in &items {
            if item.is_cash() {
                outcomes.push(ItemOutcome::Skipped {
                    item_id: item.id.clone(),
                    reason: SkipReason::CashSentinel,
                });
                continue;
            }

            if let Some(last_update) = item.last_update {
                if Utc::now() - last_update < self.config.freshness_window {
                    debug!("Skipping '{}': price still fresh", item.name);
                    outcomes.push(ItemOutcome::Skipped {
                        item_id: item.id.clone(),
                        reason: SkipReason::FreshPrice,
                    });
                    continue;
                }
            }

            if fetched_any {
                self.pacer.pause().await;
            }
            fetched_any = true;

            // Catalog-wide refresh uses only the item's own stored wear.
            match self.fetch_record(item, None).await {
                Err(reason) => {
                    warn!("Skipping '{}': {:?}", item.name, reason);
                    outcomes.push(ItemOutcome::Skipped {
                        item_id: item.id.clone(),
                        reason,
                    });
                }
                Ok(record) => {
                    self.price_repository.append(&record).await?;
                    self.catalog_repository
                        .update_price(&item.id, record.price, record.timestamp)
                        .await?;

                    let mut refreshed = item.clone();
                    refreshed.current_price = Some(record.price);
                    refreshed.last_update = Some(record.timestamp);
                    updated.push(refreshed);

                    outcomes.push(ItemOutcome::Persisted(PriceChange {
                        item_id: item.id.clone(),
                        item_name: item.name.clone(),
                        old_price: item.current_price,
                        new_price: record.price,
                    }));
                }
            }
        }

        let skipped = outcomes
            .iter()
            .filter(|o| matches!(o, ItemOutcome::Skipped { .. }))
            .count();
        info!(
            "Catalog refresh complete: {} updated, {} skipped",
            updated.len(),
            skipped
        );

        Ok(updated)
    }

    async fn refresh_catalog_item(&self, item_id: &str) -> Result<Option<PriceChange>> {
        let item = self.catalog_repository.get_by_id(item_id)?;

        if item.is_cash() {
            debug!("Refusing to refresh cash sentinel '{}'", item.name);
            return Ok(None);
        }

        match self.fetch_record(&item, None).await {
            Err(reason) => {
                warn!("No price for '{}': {:?}", item.name, reason);
                Ok(None)
            }
            Ok(record) => {
                let change = self.persist_catalog_price(&item, &record).await?;
                Ok(Some(change))
            }
        }
    }

    async fn refresh_holding(
        &self,
        holding_id: &str,
        owner_id: &str,
    ) -> Result<Option<PriceChange>> {
        let holding = self.holding_repository.get_for_owner(holding_id, owner_id)?;
        let item = self.catalog_repository.get_by_id(&holding.item_id)?;

        if item.is_cash() {
            debug!("Refusing to refresh cash sentinel holding {}", holding.id);
            return Ok(None);
        }

        match self.fetch_record(&item, Some(&holding)).await {
            Err(reason) => {
                warn!("No price for holding {}: {:?}", holding.id, reason);
                Ok(None)
            }
            Ok(record) => {
                // Holding-scoped: the price reflects this holding's exact
                // float/phase, so only this holding's price is touched.
                self.price_repository.append(&record).await?;
                self.catalog_repository
                    .update_price(&item.id, record.price, record.timestamp)
                    .await?;
                self.holding_repository
                    .update_price(&holding.id, record.price)
                    .await?;

                let change = PriceChange {
                    item_id: item.id.clone(),
                    item_name: item.name.clone(),
                    old_price: holding.current_price.or(item.current_price),
                    new_price: record.price,
                };

                if let Some(url) = &holding.webhook_url {
                    self.notifier.send_price_change(url, &change).await;
                }

                Ok(Some(change))
            }
        }
    }
}
