//! Orchestrator tests over in-memory repositories and a fake provider.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use skinfolio_market_data::{FloatRange, Listing, MarketError, PriceProvider};

use crate::catalog::{CatalogItem, CatalogRepositoryTrait, ItemType, Wear};
use crate::errors::{DatabaseError, Error, Result};
use crate::holdings::{Holding, HoldingRepositoryTrait};
use crate::notify::Notifier;
use crate::portfolio::{PortfolioSnapshot, SnapshotRepositoryTrait};
use crate::sync::{
    NoopPacer, PriceChange, PriceRecord, PriceRepositoryTrait, PriceSyncService,
    PriceSyncServiceTrait, SyncConfig,
};

// ============================================================================
// In-memory collaborators
// ============================================================================

#[derive(Default)]
struct MockCatalogRepository {
    items: Mutex<HashMap<String, CatalogItem>>,
    listed_types: Mutex<Vec<Vec<ItemType>>>,
}

impl MockCatalogRepository {
    fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().map(|i| (i.id.clone(), i)).collect()),
            listed_types: Mutex::new(Vec::new()),
        }
    }

    fn get(&self, item_id: &str) -> Option<CatalogItem> {
        self.items.lock().unwrap().get(item_id).cloned()
    }
}

#[async_trait]
impl CatalogRepositoryTrait for MockCatalogRepository {
    fn get_by_id(&self, item_id: &str) -> Result<CatalogItem> {
        self.get(item_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(item_id.to_string())))
    }

    fn get_by_slug(&self, slug: &str) -> Result<CatalogItem> {
        self.items
            .lock()
            .unwrap()
            .values()
            .find(|i| i.slug == slug)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(slug.to_string())))
    }

    fn list_by_types(&self, types: &[ItemType]) -> Result<Vec<CatalogItem>> {
        self.listed_types.lock().unwrap().push(types.to_vec());
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|i| types.contains(&i.item_type))
            .cloned()
            .collect())
    }

    async fn update_price(
        &self,
        item_id: &str,
        price: Decimal,
        as_of: DateTime<Utc>,
    ) -> Result<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(item_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(item_id.to_string())))?;
        item.current_price = Some(price);
        item.last_update = Some(as_of);
        Ok(())
    }
}

#[derive(Default)]
struct MockHoldingRepository {
    holdings: Mutex<Vec<Holding>>,
}

impl MockHoldingRepository {
    fn with_holdings(holdings: Vec<Holding>) -> Self {
        Self {
            holdings: Mutex::new(holdings),
        }
    }

    fn get(&self, holding_id: &str) -> Option<Holding> {
        self.holdings
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == holding_id)
            .cloned()
    }
}

#[async_trait]
impl HoldingRepositoryTrait for MockHoldingRepository {
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Holding>> {
        Ok(self
            .holdings
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn get_for_owner(&self, holding_id: &str, owner_id: &str) -> Result<Holding> {
        self.holdings
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == holding_id && h.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(holding_id.to_string())))
    }

    async fn update_price(&self, holding_id: &str, price: Decimal) -> Result<()> {
        let mut holdings = self.holdings.lock().unwrap();
        let holding = holdings
            .iter_mut()
            .find(|h| h.id == holding_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(holding_id.to_string())))?;
        holding.current_price = Some(price);
        Ok(())
    }

    async fn update_price_for_item(&self, item_id: &str, price: Decimal) -> Result<usize> {
        let mut holdings = self.holdings.lock().unwrap();
        let mut updated = 0;
        for holding in holdings.iter_mut().filter(|h| h.item_id == item_id) {
            holding.current_price = Some(price);
            updated += 1;
        }
        Ok(updated)
    }
}

#[derive(Default)]
struct MockPriceRepository {
    records: Mutex<Vec<PriceRecord>>,
    fail: bool,
}

#[async_trait]
impl PriceRepositoryTrait for MockPriceRepository {
    async fn append(&self, record: &PriceRecord) -> Result<()> {
        if self.fail {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk full".to_string(),
            )));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn list_for_item(&self, market: &str, item_id: &str) -> Result<Vec<PriceRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.market == market && r.item_id == item_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct MockSnapshotRepository {
    snapshots: Mutex<Vec<PortfolioSnapshot>>,
}

#[async_trait]
impl SnapshotRepositoryTrait for MockSnapshotRepository {
    async fn append(&self, snapshot: &PortfolioSnapshot) -> Result<()> {
        self.snapshots.lock().unwrap().push(snapshot.clone());
        Ok(())
    }

    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<PortfolioSnapshot>> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

/// Fake provider: a term maps to cents (`Some`), to a priceless listing
/// (`None`), or is unknown (no listing). Terms in `unreachable` simulate a
/// transport failure. Every call is captured.
#[derive(Default)]
struct FakeProvider {
    prices: HashMap<String, Option<i64>>,
    unreachable: HashSet<String>,
    captured: Mutex<Vec<(String, Option<FloatRange>)>>,
}

impl FakeProvider {
    fn with_price(mut self, term: &str, cents: i64) -> Self {
        self.prices.insert(term.to_string(), Some(cents));
        self
    }

    fn with_priceless_listing(mut self, term: &str) -> Self {
        self.prices.insert(term.to_string(), None);
        self
    }

    fn with_unreachable(mut self, term: &str) -> Self {
        self.unreachable.insert(term.to_string());
        self
    }

    fn calls(&self) -> Vec<(String, Option<FloatRange>)> {
        self.captured.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceProvider for FakeProvider {
    fn id(&self) -> &'static str {
        "FAKE"
    }

    async fn fetch_price(
        &self,
        term: &str,
        float_range: Option<FloatRange>,
    ) -> std::result::Result<Listing, MarketError> {
        self.captured
            .lock()
            .unwrap()
            .push((term.to_string(), float_range));

        if self.unreachable.contains(term) {
            return Err(MarketError::ProviderError {
                provider: "FAKE".to_string(),
                message: "connection refused".to_string(),
            });
        }

        match self.prices.get(term) {
            Some(Some(cents)) => Ok(Listing::buy_now(
                *cents,
                term.to_string(),
                "FAKE".to_string(),
            )),
            Some(None) => Ok(Listing {
                price_cents: None,
                market_hash_name: term.to_string(),
                phase: None,
                listing_type: skinfolio_market_data::ListingType::BuyNow,
                source: "FAKE".to_string(),
            }),
            None => Err(MarketError::NoListingFound(term.to_string())),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<(String, PriceChange)>>,
}

impl RecordingNotifier {
    fn calls(&self) -> Vec<(String, PriceChange)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_price_change(&self, endpoint: &str, change: &PriceChange) {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), change.clone()));
    }
}

// ============================================================================
// Fixture
// ============================================================================

struct Fixture {
    catalog: Arc<MockCatalogRepository>,
    holdings: Arc<MockHoldingRepository>,
    prices: Arc<MockPriceRepository>,
    snapshots: Arc<MockSnapshotRepository>,
    provider: Arc<FakeProvider>,
    notifier: Arc<RecordingNotifier>,
    service: PriceSyncService,
}

fn fixture(
    items: Vec<CatalogItem>,
    holdings: Vec<Holding>,
    provider: FakeProvider,
    config: SyncConfig,
) -> Fixture {
    let catalog = Arc::new(MockCatalogRepository::with_items(items));
    let holdings = Arc::new(MockHoldingRepository::with_holdings(holdings));
    let prices = Arc::new(MockPriceRepository::default());
    let snapshots = Arc::new(MockSnapshotRepository::default());
    let provider = Arc::new(provider);
    let notifier = Arc::new(RecordingNotifier::default());

    let service = PriceSyncService::new(
        catalog.clone(),
        holdings.clone(),
        prices.clone(),
        snapshots.clone(),
        provider.clone(),
        notifier.clone(),
        Arc::new(NoopPacer),
        config,
    );

    Fixture {
        catalog,
        holdings,
        prices,
        snapshots,
        provider,
        notifier,
        service,
    }
}

fn skin(id: &str, name: &str, wear: Option<Wear>) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        slug: id.to_string(),
        name: name.to_string(),
        item_type: ItemType::Skin,
        rarity: Some("Classified".to_string()),
        wear,
        container: None,
        current_price: None,
        last_update: None,
    }
}

fn cash_item() -> CatalogItem {
    CatalogItem {
        id: "cash".to_string(),
        slug: "cash".to_string(),
        name: "Cash balance".to_string(),
        item_type: ItemType::Cash,
        rarity: None,
        wear: None,
        container: None,
        current_price: None,
        last_update: None,
    }
}

fn holding(id: &str, item_id: &str, buy_price: Decimal) -> Holding {
    Holding {
        id: id.to_string(),
        owner_id: "owner-1".to_string(),
        item_id: item_id.to_string(),
        amount: 1,
        buy_price,
        current_price: None,
        float_value: None,
        pattern: None,
        variant: None,
        phase: None,
        wear: None,
        webhook_url: None,
    }
}

// ============================================================================
// Portfolio refresh
// ============================================================================

#[tokio::test]
async fn test_portfolio_refresh_prices_skin_and_skips_cash() {
    let item = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));
    let mut skin_holding = holding("h-1", "ak-redline", dec!(10));
    skin_holding.float_value = Some(0.0915);
    let cash_holding = holding("h-2", "cash", dec!(50));

    let provider = FakeProvider::default().with_price("AK-47 | Redline (Field-Tested)", 1550);

    let f = fixture(
        vec![item, cash_item()],
        vec![skin_holding, cash_holding],
        provider,
        SyncConfig::default(),
    );

    let changes = f.service.refresh_owner_portfolio("owner-1").await.unwrap();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].new_price, dec!(15.50));
    assert_eq!(changes[0].old_price, None);

    // The provider saw exactly one call, constrained by the derived range.
    let calls = f.provider.calls();
    assert_eq!(calls.len(), 1);
    let range = calls[0].1.unwrap();
    assert_eq!(range.min, 0.0);
    assert_eq!(range.max, 0.10);

    // Price history, catalog, and holding were all updated.
    assert_eq!(f.prices.list_for_item("CSFLOAT", "ak-redline").unwrap().len(), 1);
    assert_eq!(
        f.catalog.get("ak-redline").unwrap().current_price,
        Some(dec!(15.50))
    );
    assert_eq!(f.holdings.get("h-1").unwrap().current_price, Some(dec!(15.50)));

    // Snapshot covers only the non-cash holding.
    let snapshots = f.snapshots.list_for_owner("owner-1").unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].invested, dec!(10));
    assert_eq!(snapshots[0].value, dec!(15.50));
    assert_eq!(snapshots[0].profit, dec!(5.50));

    // No endpoint configured, so no notification.
    assert!(f.notifier.calls().is_empty());
}

#[tokio::test]
async fn test_webhook_invoked_when_endpoint_configured() {
    let item = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));
    let mut h = holding("h-1", "ak-redline", dec!(10));
    h.webhook_url = Some("https://hooks.example/abc".to_string());

    let provider = FakeProvider::default().with_price("AK-47 | Redline (Field-Tested)", 1200);

    let f = fixture(vec![item], vec![h], provider, SyncConfig::default());
    f.service.refresh_owner_portfolio("owner-1").await.unwrap();

    let calls = f.notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "https://hooks.example/abc");
    assert_eq!(calls[0].1.new_price, dec!(12.00));
}

#[tokio::test]
async fn test_failed_item_does_not_abort_batch() {
    let priced = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));
    let unlisted = skin("m4-howl", "M4A4 | Howl", Some(Wear::FactoryNew));
    let unreachable = skin("awp-dlore", "AWP | Dragon Lore", Some(Wear::FactoryNew));

    let provider = FakeProvider::default()
        .with_price("AK-47 | Redline (Field-Tested)", 1550)
        .with_unreachable("AWP | Dragon Lore (Factory New)");

    let f = fixture(
        vec![priced, unlisted, unreachable],
        vec![
            holding("h-1", "m4-howl", dec!(100)),
            holding("h-2", "awp-dlore", dec!(1000)),
            holding("h-3", "ak-redline", dec!(10)),
        ],
        provider,
        SyncConfig::default(),
    );

    let changes = f.service.refresh_owner_portfolio("owner-1").await.unwrap();

    // The two failures are contained; processing reaches the last holding.
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].item_id, "ak-redline");
    assert_eq!(f.provider.calls().len(), 3);
    assert_eq!(f.snapshots.list_for_owner("owner-1").unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_listing_is_skipped() {
    let item = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));
    let provider =
        FakeProvider::default().with_priceless_listing("AK-47 | Redline (Field-Tested)");

    let f = fixture(
        vec![item],
        vec![holding("h-1", "ak-redline", dec!(10))],
        provider,
        SyncConfig::default(),
    );

    let changes = f.service.refresh_owner_portfolio("owner-1").await.unwrap();
    assert!(changes.is_empty());
    assert!(f.prices.list_for_item("CSFLOAT", "ak-redline").unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_refresh_snapshot_is_configurable() {
    let item = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));

    // Default: snapshot is written even when nothing was priced.
    let f = fixture(
        vec![item.clone()],
        vec![holding("h-1", "ak-redline", dec!(10))],
        FakeProvider::default(),
        SyncConfig::default(),
    );
    f.service.refresh_owner_portfolio("owner-1").await.unwrap();
    assert_eq!(f.snapshots.list_for_owner("owner-1").unwrap().len(), 1);

    // Opting out suppresses the empty snapshot.
    let config = SyncConfig {
        snapshot_when_empty: false,
        ..SyncConfig::default()
    };
    let f = fixture(
        vec![item],
        vec![holding("h-1", "ak-redline", dec!(10))],
        FakeProvider::default(),
        config,
    );
    f.service.refresh_owner_portfolio("owner-1").await.unwrap();
    assert!(f.snapshots.list_for_owner("owner-1").unwrap().is_empty());
}

#[tokio::test]
async fn test_persistence_fault_aborts_invocation() {
    let item = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));
    let provider = FakeProvider::default().with_price("AK-47 | Redline (Field-Tested)", 1550);

    let catalog = Arc::new(MockCatalogRepository::with_items(vec![item]));
    let holdings = Arc::new(MockHoldingRepository::with_holdings(vec![holding(
        "h-1",
        "ak-redline",
        dec!(10),
    )]));
    let prices = Arc::new(MockPriceRepository {
        fail: true,
        ..MockPriceRepository::default()
    });
    let snapshots = Arc::new(MockSnapshotRepository::default());

    let service = PriceSyncService::new(
        catalog,
        holdings,
        prices,
        snapshots.clone(),
        Arc::new(provider),
        Arc::new(RecordingNotifier::default()),
        Arc::new(NoopPacer),
        SyncConfig::default(),
    );

    let result = service.refresh_owner_portfolio("owner-1").await;
    assert!(matches!(result, Err(Error::Database(_))));
    assert!(snapshots.list_for_owner("owner-1").unwrap().is_empty());
}

// ============================================================================
// Catalog refresh
// ============================================================================

#[tokio::test]
async fn test_freshness_guard_skips_recent_prices() {
    let mut fresh = skin("fresh", "AK-47 | Redline", Some(Wear::FieldTested));
    fresh.current_price = Some(dec!(15));
    fresh.last_update = Some(Utc::now() - Duration::minutes(23 * 60 + 59));

    let mut stale = skin("stale", "Glock-18 | Fade", Some(Wear::FactoryNew));
    stale.current_price = Some(dec!(200));
    stale.last_update = Some(Utc::now() - Duration::minutes(24 * 60 + 1));

    let provider = FakeProvider::default()
        .with_price("AK-47 | Redline (Field-Tested)", 1600)
        .with_price("Glock-18 | Fade (Factory New)", 21000);

    let f = fixture(vec![fresh, stale], vec![], provider, SyncConfig::default());

    let updated = f.service.refresh_catalog(Some(ItemType::Skin)).await.unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].id, "stale");
    assert_eq!(updated[0].current_price, Some(dec!(210)));

    let calls = f.provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Glock-18 | Fade (Factory New)");

    // The fresh item's stored price is untouched.
    assert_eq!(f.catalog.get("fresh").unwrap().current_price, Some(dec!(15)));
}

#[tokio::test]
async fn test_catalog_refresh_defaults_to_skins_and_cases() {
    let f = fixture(
        vec![],
        vec![],
        FakeProvider::default(),
        SyncConfig::default(),
    );

    f.service.refresh_catalog(None).await.unwrap();

    let listed = f.catalog.listed_types.lock().unwrap().clone();
    assert_eq!(listed, vec![vec![ItemType::Skin, ItemType::Case]]);
}

#[tokio::test]
async fn test_catalog_refresh_ignores_holding_context() {
    // A never-updated item with a float-carrying holding: the catalog pass
    // must query with the stored wear only and no float range.
    let item = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));
    let mut h = holding("h-1", "ak-redline", dec!(10));
    h.float_value = Some(0.03);
    h.wear = Some(Wear::FactoryNew);

    let provider = FakeProvider::default().with_price("AK-47 | Redline (Field-Tested)", 1550);

    let f = fixture(vec![item], vec![h], provider, SyncConfig::default());
    let updated = f.service.refresh_catalog(Some(ItemType::Skin)).await.unwrap();

    assert_eq!(updated.len(), 1);
    let calls = f.provider.calls();
    assert_eq!(calls[0].0, "AK-47 | Redline (Field-Tested)");
    assert!(calls[0].1.is_none());
}

// ============================================================================
// Single-entity refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_catalog_item_returns_change() {
    let mut item = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));
    item.current_price = Some(dec!(10));

    let provider = FakeProvider::default().with_price("AK-47 | Redline (Field-Tested)", 800);

    let f = fixture(
        vec![item],
        vec![holding("h-1", "ak-redline", dec!(10))],
        provider,
        SyncConfig::default(),
    );

    let change = f
        .service
        .refresh_catalog_item("ak-redline")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(change.old_price, Some(dec!(10)));
    assert_eq!(change.new_price, dec!(8.00));
    assert_eq!(change.difference(), dec!(-2.00));
    assert_eq!(change.percent_change(), dec!(-20));

    // Catalog-driven push reaches the referencing holding.
    assert_eq!(f.holdings.get("h-1").unwrap().current_price, Some(dec!(8.00)));
}

#[tokio::test]
async fn test_refresh_catalog_item_unknown_id_is_not_found() {
    let f = fixture(
        vec![],
        vec![],
        FakeProvider::default(),
        SyncConfig::default(),
    );

    let result = f.service.refresh_catalog_item("missing").await;
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_refresh_catalog_item_cash_sentinel_is_refused() {
    let f = fixture(
        vec![cash_item()],
        vec![],
        FakeProvider::default(),
        SyncConfig::default(),
    );

    let result = f.service.refresh_catalog_item("cash").await.unwrap();
    assert!(result.is_none());
    assert!(f.provider.calls().is_empty());
}

#[tokio::test]
async fn test_refresh_catalog_item_fetch_failure_is_absent_result() {
    let item = skin("ak-redline", "AK-47 | Redline", Some(Wear::FieldTested));
    let f = fixture(
        vec![item],
        vec![],
        FakeProvider::default(),
        SyncConfig::default(),
    );

    let result = f.service.refresh_catalog_item("ak-redline").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_refresh_holding_touches_only_that_holding() {
    let mut item = skin("karambit-doppler", "Karambit | Doppler", None);
    item.item_type = ItemType::Knife;
    let mut mine = holding("h-1", "karambit-doppler", dec!(900));
    mine.wear = Some(Wear::FactoryNew);
    mine.phase = Some("Sapphire".to_string());
    let other = holding("h-2", "karambit-doppler", dec!(700));

    let provider = FakeProvider::default()
        .with_price("★ Karambit | Doppler (Factory New) Sapphire", 1_500_00);

    let f = fixture(
        vec![item],
        vec![mine, other],
        provider,
        SyncConfig::default(),
    );

    let change = f
        .service
        .refresh_holding("h-1", "owner-1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(change.new_price, dec!(1500.00));
    // The phase-specific price lands on the refreshed holding only.
    assert_eq!(f.holdings.get("h-1").unwrap().current_price, Some(dec!(1500.00)));
    assert_eq!(f.holdings.get("h-2").unwrap().current_price, None);
    // The catalog item still records the observation.
    assert_eq!(
        f.catalog.get("karambit-doppler").unwrap().current_price,
        Some(dec!(1500.00))
    );
}

#[tokio::test]
async fn test_refresh_holding_unknown_id_is_not_found() {
    let f = fixture(
        vec![],
        vec![],
        FakeProvider::default(),
        SyncConfig::default(),
    );

    let result = f.service.refresh_holding("missing", "owner-1").await;
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_refresh_holding_wrong_owner_is_not_found() {
    let item = skin("ak-redline", "AK-47 | Redline", None);
    let f = fixture(
        vec![item],
        vec![holding("h-1", "ak-redline", dec!(10))],
        FakeProvider::default(),
        SyncConfig::default(),
    );

    let result = f.service.refresh_holding("h-1", "someone-else").await;
    assert!(result.unwrap_err().is_not_found());
}
