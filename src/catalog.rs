//! Item catalog - the single authoritative price table
//!
//! Clients may hold a read-only display copy, but pricing always resolves
//! against this table at order creation time.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Fixed catalog of launderable item types and their unit prices.
#[derive(Debug, Clone)]
pub struct Catalog {
    prices: BTreeMap<String, Decimal>,
}

impl Catalog {
    pub fn new(prices: BTreeMap<String, Decimal>) -> Self {
        Self { prices }
    }

    /// Unit price for an item type; `None` for unknown types.
    pub fn unit_price(&self, item_type: &str) -> Option<Decimal> {
        self.prices.get(item_type).copied()
    }

    pub fn contains(&self, item_type: &str) -> bool {
        self.prices.contains_key(item_type)
    }

    /// (type, price) pairs in stable order, for the client display copy.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_PRICES.clone())
    }
}

static DEFAULT_PRICES: Lazy<BTreeMap<String, Decimal>> = Lazy::new(|| {
    [
        ("Shirt", dec!(15)),
        ("T-Shirt", dec!(12)),
        ("Pants", dec!(20)),
        ("Jeans", dec!(25)),
        ("Undergarments", dec!(8)),
        ("Socks", dec!(5)),
        ("Bed Sheets", dec!(30)),
        ("Towels", dec!(15)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
});
