//! # Checkout Module
//!
//! Turns a cart into a payable total.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Flow                                    │
//! │                                                                         │
//! │   Σ price × qty ──► subtotal ─┐                                        │
//! │                               ├──► gross ──► discount ──► total        │
//! │   ShippingCalculator ──► shipping ─┘        (Premium 10%)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount applies to the gross total, shipping included.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::shipping::ShippingCalculator;
use crate::types::{Cart, CustomerType};

impl CustomerType {
    /// Checkout discount in basis points (1000 = 10%).
    pub const fn discount_bps(&self) -> u32 {
        match self {
            CustomerType::Standard => 0,
            CustomerType::Premium => 1_000,
        }
    }
}

// =============================================================================
// Checkout Result
// =============================================================================

/// Totals computed for a cart. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutResult {
    pub cart: Cart,
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub customer_discount: Money,
    pub total: Money,
}

impl CheckoutResult {
    /// Subtotal plus shipping, before the discount.
    pub fn gross(&self) -> Money {
        self.subtotal + self.shipping_cost
    }
}

// =============================================================================
// Checkout Engine
// =============================================================================

/// Composes subtotal, shipping and customer discount.
#[derive(Debug, Clone)]
pub struct CheckoutEngine {
    shipping: ShippingCalculator,
}

impl CheckoutEngine {
    pub fn new(shipping: ShippingCalculator) -> Self {
        CheckoutEngine { shipping }
    }

    pub fn shipping(&self) -> &ShippingCalculator {
        &self.shipping
    }

    /// Computes the totals for a cart.
    ///
    /// Never fails; carts are validated before they get here.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Address, Cart, CheckoutEngine, CustomerType, Item, ShippingCalculator};
    ///
    /// let depot = Address::new("1 Main St", "Dallas", "USA");
    /// let engine = CheckoutEngine::new(ShippingCalculator::new(depot));
    ///
    /// let mut cart = Cart::new("c-1", CustomerType::Standard, Address::new("9 Elm", "Austin", "USA"));
    /// cart.items.push(Item::new("p-1", "Widget", 200, 2));
    ///
    /// let result = engine.calculate_totals(&cart);
    /// assert_eq!(result.subtotal.cents(), 400);
    /// assert_eq!(result.shipping_cost.cents(), 400);
    /// assert!(result.customer_discount.is_zero());
    /// assert_eq!(result.total.cents(), 800);
    /// ```
    pub fn calculate_totals(&self, cart: &Cart) -> CheckoutResult {
        let subtotal = cart.subtotal();
        let shipping_cost = self.shipping.calculate_shipping_cost(cart);
        let gross = subtotal + shipping_cost;
        let customer_discount = gross.percentage(cart.customer_type.discount_bps());

        CheckoutResult {
            cart: cart.clone(),
            subtotal,
            shipping_cost,
            customer_discount,
            total: gross - customer_discount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Item, ShippingMethod};

    fn depot() -> Address {
        Address::new("1234 Deerfield St", "Dallas", "USA")
    }

    fn engine() -> CheckoutEngine {
        CheckoutEngine::new(ShippingCalculator::new(depot()))
    }

    fn cart(customer_type: CustomerType, destination: Address, items: Vec<Item>) -> Cart {
        let mut cart = Cart::new("customer-1", customer_type, destination);
        cart.items = items;
        cart
    }

    #[test]
    fn test_standard_customer_pays_no_discount() {
        let cart = cart(
            CustomerType::Standard,
            depot(),
            vec![Item::new("1", "Widget", 200, 2)],
        );

        let result = engine().calculate_totals(&cart);

        assert_eq!(result.subtotal.cents(), 400);
        assert_eq!(result.shipping_cost.cents(), 200);
        assert!(result.customer_discount.is_zero());
        assert_eq!(result.total, result.subtotal + result.shipping_cost);
        assert_eq!(result.total.cents(), 600);
    }

    #[test]
    fn test_premium_customer_gets_ten_percent_off_gross() {
        let cart = cart(
            CustomerType::Premium,
            depot(),
            vec![Item::new("1", "Widget", 200, 2)],
        );

        let result = engine().calculate_totals(&cart);

        assert_eq!(result.gross().cents(), 600);
        assert_eq!(result.customer_discount.cents(), 60);
        assert_eq!(result.total.cents(), 540);
    }

    #[test]
    fn test_multiple_items_international_premium() {
        let mut cart = cart(
            CustomerType::Premium,
            Address::new("10 High St", "London", "UK"),
            vec![
                Item::new("1", "Widget", 1099, 1),
                Item::new("2", "Gadget", 250, 3),
            ],
        );
        cart.shipping_method = ShippingMethod::Express;

        let result = engine().calculate_totals(&cart);

        // 1099 + 750
        assert_eq!(result.subtotal.cents(), 1849);
        // 4 units × $15.00 × 2.5
        assert_eq!(result.shipping_cost.cents(), 15_000);
        // 10% of 16849 = 1684.9 → 1685
        assert_eq!(result.customer_discount.cents(), 1685);
        assert_eq!(result.total.cents(), 15_164);
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let cart = cart(CustomerType::Premium, depot(), Vec::new());
        let result = engine().calculate_totals(&cart);

        assert!(result.subtotal.is_zero());
        assert!(result.shipping_cost.is_zero());
        assert!(result.customer_discount.is_zero());
        assert!(result.total.is_zero());
    }

    #[test]
    fn test_result_carries_cart() {
        let cart = cart(
            CustomerType::Standard,
            depot(),
            vec![Item::new("1", "Widget", 100, 1)],
        );
        let result = engine().calculate_totals(&cart);
        assert_eq!(result.cart, cart);
    }

    #[test]
    fn test_discount_bps() {
        assert_eq!(CustomerType::Standard.discount_bps(), 0);
        assert_eq!(CustomerType::Premium.discount_bps(), 1000);
    }
}
