//! Database model for price history rows.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use skinfolio_core::sync::PriceRecord;

/// Database model for price records. Rows are append-only; there is no
/// AsChangeset on purpose.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::price_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceRecordDB {
    pub market: String,
    pub item_id: String,
    pub timestamp: String,
    pub price: String,
}

// Conversion implementations
impl From<PriceRecordDB> for PriceRecord {
    fn from(db: PriceRecordDB) -> Self {
        let timestamp = DateTime::parse_from_rfc3339(&db.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|e| {
                log::warn!(
                    "Unparseable timestamp '{}' on price record for {}: {}",
                    db.timestamp,
                    db.item_id,
                    e
                );
                Utc::now()
            });

        let price = Decimal::from_str(&db.price).unwrap_or_else(|e| {
            log::warn!(
                "Unparseable price '{}' on price record for {}: {}",
                db.price,
                db.item_id,
                e
            );
            Decimal::ZERO
        });

        Self {
            market: db.market,
            item_id: db.item_id,
            timestamp,
            price,
        }
    }
}

impl From<PriceRecord> for PriceRecordDB {
    fn from(domain: PriceRecord) -> Self {
        Self {
            market: domain.market,
            item_id: domain.item_id,
            timestamp: domain.timestamp.to_rfc3339(),
            price: domain.price.to_string(),
        }
    }
}
