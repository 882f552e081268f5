//! Database model for holdings.

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use skinfolio_core::catalog::Wear;
use skinfolio_core::holdings::Holding;

/// Database model for holdings
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub id: String,
    pub owner_id: String,
    pub item_id: String,
    pub amount: i32,
    pub buy_price: String,
    pub current_price: Option<String>,
    pub float_value: Option<f64>,
    pub pattern: Option<i32>,
    pub variant: Option<String>,
    pub phase: Option<String>,
    pub wear: Option<String>,
    pub webhook_url: Option<String>,
}

// Conversion implementations
impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        let buy_price = Decimal::from_str(&db.buy_price).unwrap_or_else(|e| {
            log::warn!(
                "Unparseable buy price '{}' on holding {}: {}",
                db.buy_price,
                db.id,
                e
            );
            Decimal::ZERO
        });

        let current_price = db
            .current_price
            .as_deref()
            .and_then(|s| Decimal::from_str(s).ok());

        let wear = db.wear.as_deref().and_then(Wear::from_str_opt);

        Self {
            id: db.id,
            owner_id: db.owner_id,
            item_id: db.item_id,
            amount: db.amount,
            buy_price,
            current_price,
            float_value: db.float_value,
            pattern: db.pattern,
            variant: db.variant,
            phase: db.phase,
            wear,
            webhook_url: db.webhook_url,
        }
    }
}

impl From<Holding> for HoldingDB {
    fn from(domain: Holding) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            item_id: domain.item_id,
            amount: domain.amount,
            buy_price: domain.buy_price.to_string(),
            current_price: domain.current_price.map(|p| p.to_string()),
            float_value: domain.float_value,
            pattern: domain.pattern,
            variant: domain.variant,
            phase: domain.phase,
            wear: domain.wear.map(|w| w.as_str().to_string()),
            webhook_url: domain.webhook_url,
        }
    }
}
