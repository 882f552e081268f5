//! Canonical market query construction.
//!
//! Maps a catalog item plus an optional holding context to the exact search
//! term the listings providers expect. The construction rules are
//! order-sensitive: wear is appended before the variant prefix, the star
//! glyph goes in front of the variant, and the phase label lands at the very
//! end. Provider-side search depends on reproducing this order exactly.

use skinfolio_market_data::FloatRange;

use crate::catalog::{CatalogItem, ItemType};
use crate::holdings::Holding;

/// Star glyph carried by knife and glove market names.
const STAR_GLYPH: &str = "★";

/// A canonical market search query with an optional wear float constraint.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketQuery {
    pub term: String,
    pub float_range: Option<FloatRange>,
}

/// Build the market query for an item, using holding-level wear, variant,
/// phase, and float when a holding context is given.
///
/// Pure and deterministic; no I/O.
pub fn build_query(item: &CatalogItem, holding: Option<&Holding>) -> MarketQuery {
    let float_range = holding
        .and_then(|h| h.float_value)
        .map(FloatRange::for_value);

    // Charms override every other rule.
    if item.item_type == ItemType::Charm {
        return MarketQuery {
            term: format!("Charm | {}", item.name.trim()),
            float_range,
        };
    }

    let mut term = item.name.trim().to_string();

    let wear = holding.and_then(|h| h.wear).or(item.wear);
    if let Some(wear) = wear {
        term = format!("{} ({})", term, wear);
    }

    if let Some(variant) = holding.and_then(|h| h.variant.as_deref()) {
        term = format!("{} {}", variant, term);
    }

    if item.item_type.is_starred() && !term.starts_with(STAR_GLYPH) {
        term = format!("{} {}", STAR_GLYPH, term);
    }

    if let Some(phase) = holding.and_then(|h| h.phase.as_deref()) {
        term = format!("{} {}", term, phase);
    }

    MarketQuery { term, float_range }
}
