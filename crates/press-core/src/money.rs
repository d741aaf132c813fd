//! # Money Module
//!
//! Integer-cent money for values that leave the engine.
//!
//! ## Where Floats Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PriceBreakdown (f64, unrounded)                                        │
//! │    production = q^e × k         material = q × (paper + clicks) × …     │
//! │    subtotal, total_cost, unit_price                                     │
//! │                 │                                                       │
//! │                 ▼  Money::round_from_dollars  ← the ONLY rounding step  │
//! │  Quote (integer cents)                                                  │
//! │    total, unit_price  → cart line, invoice, display                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cost formulas are fractional by nature (`q^0.75`), so the engine
//! computes in `f64` and callers convert once, at the cart boundary.
//!
//! ## Usage
//! ```rust
//! use press_core::money::Money;
//!
//! let total = Money::round_from_dollars(103.4765);
//! assert_eq!(total.cents(), 10348);
//! assert_eq!(total.to_string(), "$103.48");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (USD).
///
/// - **i64 (signed)**: discounts and savings can be shown as negatives
/// - **Single field tuple struct**: zero-cost wrapper
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a dollar amount to the nearest cent, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use press_core::money::Money;
    ///
    /// assert_eq!(Money::round_from_dollars(2.125).cents(), 213);
    /// assert_eq!(Money::round_from_dollars(-0.005).cents(), -1);
    /// ```
    pub fn round_from_dollars(dollars: f64) -> Self {
        // Nudge by a tiny epsilon so 2.125 (stored as 2.12499999…) rounds up.
        let scaled = dollars * 100.0;
        let nudged = scaled + scaled.signum() * 1e-9;
        Money(nudged.round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the value as fractional dollars (display and JSON only).
    #[inline]
    pub fn as_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Quote
// =============================================================================

/// The cart-facing, cent-rounded view of a price breakdown.
///
/// ## Note
/// `unit_price × quantity` may differ from `total` by a few cents; the cart
/// charges `total`, and `unit_price` is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quote {
    pub quantity: u32,
    pub total: Money,
    pub unit_price: Money,
}

impl Quote {
    /// Rounds an unrounded total to a cart quote.
    pub fn from_total(total: f64, quantity: u32) -> Self {
        let unit = if quantity == 0 {
            0.0
        } else {
            total / quantity as f64
        };
        Quote {
            quantity,
            total: Money::round_from_dollars(total),
            unit_price: Money::round_from_dollars(unit),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(10625).to_string(), "$106.25");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
    }

    #[test]
    fn test_round_from_dollars_half_up() {
        assert_eq!(Money::round_from_dollars(2.125).cents(), 213);
        assert_eq!(Money::round_from_dollars(1.034_765).cents(), 103);
        assert_eq!(Money::round_from_dollars(0.0).cents(), 0);
        assert_eq!(Money::round_from_dollars(106.25).cents(), 10625);
    }

    #[test]
    fn test_ordering_and_zero() {
        assert!(Money::from_cents(-1) < Money::zero());
        assert!(Money::zero().is_zero());
        assert_eq!(Money::default(), Money::zero());
        assert_eq!(Money::from_cents(10348).as_dollars(), 103.48);
    }

    #[test]
    fn test_quote_from_total() {
        let quote = Quote::from_total(106.25, 50);
        assert_eq!(quote.total.cents(), 10625);
        assert_eq!(quote.unit_price.cents(), 213);
        assert_eq!(quote.quantity, 50);

        let empty = Quote::from_total(0.0, 0);
        assert!(empty.unit_price.is_zero());
    }
}
