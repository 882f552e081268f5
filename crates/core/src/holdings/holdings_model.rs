use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Wear;

/// A specific owner's instance of a catalog item.
///
/// `current_price` is tracked independently of the catalog price: it is pushed
/// in lockstep during a catalog-driven price write, but a holding-scoped
/// refresh prices the exact float/phase/variant the owner holds, which can
/// diverge from the base item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub owner_id: String,
    /// Catalog item this holding references.
    pub item_id: String,
    pub amount: i32,
    pub buy_price: Decimal,
    pub current_price: Option<Decimal>,
    /// Wear float, domain [0, 1].
    pub float_value: Option<f64>,
    /// Paint seed / pattern index.
    pub pattern: Option<i32>,
    /// Special-edition prefix, e.g. "StatTrak™" or "Souvenir".
    pub variant: Option<String>,
    /// Phase label for Doppler-style items.
    pub phase: Option<String>,
    /// Exterior override; falls back to the catalog default when absent.
    pub wear: Option<Wear>,
    /// Optional endpoint for price-change notifications.
    pub webhook_url: Option<String>,
}

impl Holding {
    /// Total acquisition cost of this holding.
    pub fn invested(&self) -> Decimal {
        self.buy_price * Decimal::from(self.amount)
    }

    /// Current market value, falling back to the buy price while the holding
    /// has never been priced.
    pub fn market_value(&self) -> Decimal {
        self.current_price.unwrap_or(self.buy_price) * Decimal::from(self.amount)
    }
}
