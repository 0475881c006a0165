//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Expedited shipping on 3 units, same country:                          │
//! │    3 × 2.0 × 1.2 = 7.199999999999999  ❌ WRONG!                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                            │
//! │    3 × 200 cents × 12000 bps / 10000 = 720 cents                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//!
//! let line = price.multiply_quantity(2);     // $21.98
//! let total = line + Money::from_cents(500);  // $26.98
//! assert_eq!(total.cents(), 2698);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::BPS_SCALE;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction of a discount can never wrap
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a bare integer**: `{"total": 540}`
///
/// ## Where Money is Used
/// ```text
/// Item.price_cents ──► Item.line_total ──► CheckoutResult.subtotal
///                                                 │
/// ShippingCalculator ──► shipping_cost ───────────┤
///                                                 ▼
///                              gross ──► discount ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u64) -> Self {
        let qty = if qty > i64::MAX as u64 { i64::MAX } else { qty as i64 };
        Money(self.0.saturating_mul(qty))
    }

    /// Scales the amount by a multiplier given in basis points.
    ///
    /// 10000 bps leaves the amount unchanged, 12000 bps is ×1.2.
    /// Rounds half away from zero to the nearest cent and saturates at the
    /// `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let base = Money::from_cents(600);
    /// assert_eq!(base.scale_bps(12_000).cents(), 720);
    /// assert_eq!(base.scale_bps(25_000).cents(), 1500);
    /// ```
    pub fn scale_bps(&self, bps: u32) -> Money {
        Money::from_cents(round_div(self.0 as i128 * bps as i128, BPS_SCALE as i128))
    }

    /// Returns `bps` of this amount (1000 bps = 10%), rounded to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let gross = Money::from_cents(600); // $6.00
    /// assert_eq!(gross.percentage(1000).cents(), 60); // 10% = $0.60
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        self.scale_bps(bps)
    }
}

/// Integer division rounding half away from zero.
fn round_div(numerator: i128, denominator: i128) -> i64 {
    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    };
    rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Add, Sub and Sum saturate: an out-of-range cart pins at the bound instead
// of wrapping to a total with the wrong sign.

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs. Clients receive raw cents and format them themselves.
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

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
