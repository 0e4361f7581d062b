//! Pricing rule - pure, deterministic, independent of wall clock
//!
//! ```text
//! subtotal   = sum(quantity x unit_price)
//! multiplier = 1.50 (1 day) | 1.25 (2 days) | 1.00 (otherwise)
//! total      = round(subtotal x multiplier, 2 dp)
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::models::OrderItem;

/// Urgency surcharge multiplier. 3 days (NORMAL) and anything else pay no
/// surcharge; validation upstream restricts the field to {1, 2, 3}.
pub fn surcharge_multiplier(urgency_days: u8) -> Decimal {
    match urgency_days {
        1 => dec!(1.50),
        2 => dec!(1.25),
        _ => dec!(1.00),
    }
}

/// Sum of line totals over already-priced items.
pub fn subtotal(items: &[OrderItem]) -> Decimal {
    items.iter().map(|item| item.item_total()).sum()
}

/// Total price for an order: subtotal x urgency multiplier, rounded to
/// 2 decimal places (half away from zero).
pub fn total_price(items: &[OrderItem], urgency_days: u8) -> Decimal {
    (subtotal(items) * surcharge_multiplier(urgency_days))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
