//! Database model for portfolio snapshots.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use skinfolio_core::portfolio::PortfolioSnapshot;

/// Database model for portfolio snapshots. Append-only.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioSnapshotDB {
    pub owner_id: String,
    pub timestamp: String,
    pub invested: String,
    pub value: String,
    pub profit: String,
}

fn parse_decimal(raw: &str, field: &str, owner: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|e| {
        log::warn!(
            "Unparseable {} '{}' on snapshot for {}: {}",
            field,
            raw,
            owner,
            e
        );
        Decimal::ZERO
    })
}

// Conversion implementations
impl From<PortfolioSnapshotDB> for PortfolioSnapshot {
    fn from(db: PortfolioSnapshotDB) -> Self {
        let timestamp = DateTime::parse_from_rfc3339(&db.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|e| {
                log::warn!(
                    "Unparseable timestamp '{}' on snapshot for {}: {}",
                    db.timestamp,
                    db.owner_id,
                    e
                );
                Utc::now()
            });

        let invested = parse_decimal(&db.invested, "invested", &db.owner_id);
        let value = parse_decimal(&db.value, "value", &db.owner_id);
        let profit = parse_decimal(&db.profit, "profit", &db.owner_id);

        Self {
            owner_id: db.owner_id,
            timestamp,
            invested,
            value,
            profit,
        }
    }
}

impl From<PortfolioSnapshot> for PortfolioSnapshotDB {
    fn from(domain: PortfolioSnapshot) -> Self {
        Self {
            owner_id: domain.owner_id,
            timestamp: domain.timestamp.to_rfc3339(),
            invested: domain.invested.to_string(),
            value: domain.value.to_string(),
            profit: domain.profit.to_string(),
        }
    }
}
