//! # basket-core: Pure Business Logic for Basket
//!
//! This crate is the **heart** of the Basket shopping cart service. It holds
//! the domain types and every calculation as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    basket-api (axum)                            │   │
//! │  │    POST /carts ──► GET /carts/{id} ──► GET /carts/{id}/checkout │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ validation│  │ shipping  │  │ checkout  │  │   │
//! │  │   │   Cart    │  │  Address  │  │   Tier    │  │  Engine   │  │   │
//! │  │   │   Item    │  │ Validator │  │ Multiplier│  │  Result   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    basket-db (Document Store)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Address, Item, Cart, CustomerType, ShippingMethod)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Address validator and input rules
//! - [`shipping`] - Shipping cost calculator
//! - [`checkout`] - Checkout engine (subtotal + shipping - discount)
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Address, Cart, CheckoutEngine, CustomerType, Item, ShippingCalculator};
//!
//! let depot = Address::new("1 Main St", "Anywhere", "USA");
//! let engine = CheckoutEngine::new(ShippingCalculator::new(depot.clone()));
//!
//! let mut cart = Cart::new("customer-1", CustomerType::Premium, depot);
//! cart.items.push(Item::new("prod-1", "Widget", 200, 2));
//!
//! let result = engine.calculate_totals(&cart);
//! // $4.00 items + $2.00 shipping = $6.00, minus 10% premium discount
//! assert_eq!(result.total.cents(), 540);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod shipping;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{CheckoutEngine, CheckoutResult};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use shipping::{ShippingCalculator, ShippingTier};
pub use types::*;
pub use validation::AddressValidator;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in a cart.
///
/// Zero is allowed (the line simply contributes nothing).
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Maximum unit price in cents ($10,000,000.00).
///
/// 100 items × 999 units × this price is about 1e14 cents, far inside `i64`
/// even after shipping is added.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// One basis point is 1/10000; 10000 bps is a multiplier of 1.0.
pub const BPS_SCALE: i64 = 10_000;
