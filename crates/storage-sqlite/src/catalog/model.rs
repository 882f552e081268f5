//! Database model for catalog items.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use skinfolio_core::catalog::{CatalogItem, ItemType, Wear};

/// Database model for catalog items
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
#[diesel(table_name = crate::schema::catalog_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CatalogItemDB {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub item_type: String,
    pub rarity: Option<String>,
    pub wear: Option<String>,
    pub container: Option<String>,
    pub current_price: Option<String>,
    pub last_update: Option<String>,
}

// Conversion implementations
impl From<CatalogItemDB> for CatalogItem {
    fn from(db: CatalogItemDB) -> Self {
        let item_type = ItemType::from_str_opt(&db.item_type).unwrap_or_else(|| {
            log::warn!(
                "Unknown item type '{}' for catalog item {}, treating as skin",
                db.item_type,
                db.id
            );
            ItemType::Skin
        });

        let wear = db.wear.as_deref().and_then(Wear::from_str_opt);

        let current_price = db
            .current_price
            .as_deref()
            .and_then(|s| Decimal::from_str(s).ok());

        let last_update = db
            .last_update
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            id: db.id,
            slug: db.slug,
            name: db.name,
            item_type,
            rarity: db.rarity,
            wear,
            container: db.container,
            current_price,
            last_update,
        }
    }
}

impl From<CatalogItem> for CatalogItemDB {
    fn from(domain: CatalogItem) -> Self {
        Self {
            id: domain.id,
            slug: domain.slug,
            name: domain.name,
            item_type: domain.item_type.as_str().to_string(),
            rarity: domain.rarity,
            wear: domain.wear.map(|w| w.as_str().to_string()),
            container: domain.container,
            current_price: domain.current_price.map(|p| p.to_string()),
            last_update: domain.last_update.map(|ts| ts.to_rfc3339()),
        }
    }
}
