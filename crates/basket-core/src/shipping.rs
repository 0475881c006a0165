//! # Shipping Module
//!
//! Computes the shipping line of a checkout.
//!
//! ## Cost Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shipping Cost                                    │
//! │                                                                         │
//! │  destination vs depot         ShippingTier          rate per unit      │
//! │  ─────────────────────        ────────────          ─────────────      │
//! │  same country + city     ──►  SameCity        ──►    $1.00             │
//! │  same country only       ──►  SameCountry     ──►    $2.00             │
//! │  anything else           ──►  International   ──►   $15.00             │
//! │                                                                         │
//! │  base = rate × Σ item.quantity                                         │
//! │  cost = base × multiplier(method)                                      │
//! │                                                                         │
//! │  Standard 1.0 │ Expedited 1.2 │ Priority 2.0 │ Express 2.5             │
//! │                                                                         │
//! │  Premium + (Expedited | Priority) → multiplier skipped (1.0)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities are summed across the cart before the rate is applied, so a
//! cart with no units ships for free whatever the tier or method.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Address, Cart, CustomerType, ShippingMethod};
use crate::BPS_SCALE;

/// Per-unit rate when the destination is in the depot's city.
pub const SAME_CITY_RATE: Money = Money::from_cents(100);

/// Per-unit rate when the destination is in the depot's country.
pub const SAME_COUNTRY_RATE: Money = Money::from_cents(200);

/// Per-unit rate for every other destination.
pub const INTERNATIONAL_RATE: Money = Money::from_cents(1500);

/// Multiplier that leaves a cost unchanged.
const NEUTRAL_MULTIPLIER_BPS: u32 = BPS_SCALE as u32;

// =============================================================================
// Shipping Tier
// =============================================================================

/// Geographic relationship between the depot and a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingTier {
    SameCity,
    SameCountry,
    International,
}

impl ShippingTier {
    /// Cost of shipping one unit within this tier.
    pub const fn rate(&self) -> Money {
        match self {
            ShippingTier::SameCity => SAME_CITY_RATE,
            ShippingTier::SameCountry => SAME_COUNTRY_RATE,
            ShippingTier::International => INTERNATIONAL_RATE,
        }
    }
}

// =============================================================================
// Method Multipliers
// =============================================================================

impl ShippingMethod {
    /// Cost multiplier in basis points (10000 = ×1.0).
    pub const fn multiplier_bps(&self) -> u32 {
        match self {
            ShippingMethod::Standard => 10_000,
            ShippingMethod::Expedited => 12_000,
            ShippingMethod::Priority => 20_000,
            ShippingMethod::Express => 25_000,
        }
    }
}

// =============================================================================
// Shipping Calculator
// =============================================================================

/// Prices shipping from a fixed depot.
///
/// Holds nothing but the origin address, so one instance can be shared
/// across request handlers without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingCalculator {
    origin: Address,
}

impl ShippingCalculator {
    pub fn new(origin: Address) -> Self {
        ShippingCalculator { origin }
    }

    /// The depot every shipment leaves from.
    pub fn origin(&self) -> &Address {
        &self.origin
    }

    /// Classifies a destination relative to the depot.
    ///
    /// Comparison is exact string equality; "Dallas" and "dallas" are
    /// different cities.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Address, ShippingCalculator, ShippingTier};
    ///
    /// let calc = ShippingCalculator::new(Address::new("1 Main St", "Dallas", "USA"));
    /// let austin = Address::new("9 Elm St", "Austin", "USA");
    /// assert_eq!(calc.tier_for(&austin), ShippingTier::SameCountry);
    /// ```
    pub fn tier_for(&self, destination: &Address) -> ShippingTier {
        if destination.country != self.origin.country {
            ShippingTier::International
        } else if destination.city != self.origin.city {
            ShippingTier::SameCountry
        } else {
            ShippingTier::SameCity
        }
    }

    /// Multiplier actually charged for a customer/method pair.
    ///
    /// Premium customers pay the base cost for Expedited and Priority.
    pub const fn effective_multiplier_bps(customer_type: CustomerType, method: ShippingMethod) -> u32 {
        match (customer_type, method) {
            (CustomerType::Premium, ShippingMethod::Expedited | ShippingMethod::Priority) => {
                NEUTRAL_MULTIPLIER_BPS
            }
            _ => method.multiplier_bps(),
        }
    }

    /// Shipping cost for a whole cart.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Address, Cart, CustomerType, Item, ShippingCalculator, ShippingMethod};
    ///
    /// let depot = Address::new("1 Main St", "Dallas", "USA");
    /// let calc = ShippingCalculator::new(depot.clone());
    ///
    /// let mut cart = Cart::new("c-1", CustomerType::Standard, depot);
    /// cart.shipping_method = ShippingMethod::Express;
    /// cart.items.push(Item::new("p-1", "Widget", 500, 2));
    ///
    /// // 2 units × $1.00 × 2.5
    /// assert_eq!(calc.calculate_shipping_cost(&cart).cents(), 500);
    /// ```
    pub fn calculate_shipping_cost(&self, cart: &Cart) -> Money {
        let units = cart.total_quantity();
        if units == 0 {
            return Money::zero();
        }

        let base = self
            .tier_for(&cart.shipping_address)
            .rate()
            .multiply_quantity(units);
        let multiplier =
            Self::effective_multiplier_bps(cart.customer_type, cart.shipping_method);

        base.scale_bps(multiplier)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
