use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::CASH_ITEM_SLUG;

/// Classification of a catalog item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Skin,
    Knife,
    Gloves,
    Agent,
    Charm,
    Case,
    Collection,
    /// Sentinel used to carry a cash balance inside a portfolio. Never priced.
    Cash,
}

impl ItemType {
    /// Stable string form used by the storage layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Skin => "SKIN",
            ItemType::Knife => "KNIFE",
            ItemType::Gloves => "GLOVES",
            ItemType::Agent => "AGENT",
            ItemType::Charm => "CHARM",
            ItemType::Case => "CASE",
            ItemType::Collection => "COLLECTION",
            ItemType::Cash => "CASH",
        }
    }

    /// Parse the stable string form. Unknown values are rejected by the
    /// storage layer before reaching domain code.
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "SKIN" => Some(ItemType::Skin),
            "KNIFE" => Some(ItemType::Knife),
            "GLOVES" => Some(ItemType::Gloves),
            "AGENT" => Some(ItemType::Agent),
            "CHARM" => Some(ItemType::Charm),
            "CASE" => Some(ItemType::Case),
            "COLLECTION" => Some(ItemType::Collection),
            "CASH" => Some(ItemType::Cash),
            _ => None,
        }
    }

    /// True for the classes whose market names carry the star glyph.
    pub fn is_starred(&self) -> bool {
        matches!(self, ItemType::Knife | ItemType::Gloves)
    }
}

/// Exterior wear tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Wear {
    FactoryNew,
    MinimalWear,
    FieldTested,
    WellWorn,
    BattleScarred,
}

impl Wear {
    /// English label as it appears in market names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Wear::FactoryNew => "Factory New",
            Wear::MinimalWear => "Minimal Wear",
            Wear::FieldTested => "Field-Tested",
            Wear::WellWorn => "Well-Worn",
            Wear::BattleScarred => "Battle-Scarred",
        }
    }

    /// Parse either the market label or the storage form.
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "Factory New" | "FACTORY_NEW" => Some(Wear::FactoryNew),
            "Minimal Wear" | "MINIMAL_WEAR" => Some(Wear::MinimalWear),
            "Field-Tested" | "FIELD_TESTED" => Some(Wear::FieldTested),
            "Well-Worn" | "WELL_WORN" => Some(Wear::WellWorn),
            "Battle-Scarred" | "BATTLE_SCARRED" => Some(Wear::BattleScarred),
            _ => None,
        }
    }
}

impl fmt::Display for Wear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical tradable-item definition shared by all owners.
///
/// `current_price` mirrors the most recently persisted price record for the
/// item and is mutated only by the sync engine's price-write step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub item_type: ItemType,
    pub rarity: Option<String>,
    /// Default exterior used when a holding has no wear override.
    pub wear: Option<Wear>,
    /// Case or collection the item drops from.
    pub container: Option<String>,
    pub current_price: Option<Decimal>,
    pub last_update: Option<DateTime<Utc>>,
}

impl CatalogItem {
    /// True for the cash sentinel, which is never refreshed and never appears
    /// in change results.
    pub fn is_cash(&self) -> bool {
        self.item_type == ItemType::Cash || self.slug == CASH_ITEM_SLUG
    }
}
