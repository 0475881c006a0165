//! # Domain Types
//!
//! Core domain types used throughout Basket.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Cart       │   │      Item       │   │    Address      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  product_id     │   │  street         │       │
//! │  │  customer_id    │   │  product_name   │   │  city           │       │
//! │  │  customer_type  │   │  price_cents    │   │  country        │       │
//! │  │  shipping_method│   │  quantity       │   └─────────────────┘       │
//! │  │  shipping_addr ─┼──────────────────────────────►▲                   │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  CustomerType   │   │ ShippingMethod  │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  Standard       │   │  Standard       │                              │
//! │  │  Premium        │   │  Expedited      │                              │
//! │  └─────────────────┘   │  Priority       │                              │
//! │                        │  Express        │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Address
// =============================================================================

/// A mailing address.
///
/// Only compared field-by-field for shipping tiers; never parsed or geocoded.
/// Missing fields deserialize as empty strings so the validator rejects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>, country: impl Into<String>) -> Self {
        Address {
            street: street.into(),
            city: city.into(),
            country: country.into(),
        }
    }
}

// =============================================================================
// Customer Type
// =============================================================================

/// Customer classification. Premium customers get a checkout discount and
/// shipping perks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    #[default]
    Standard,
    Premium,
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerType::Standard => write!(f, "standard"),
            CustomerType::Premium => write!(f, "premium"),
        }
    }
}

// =============================================================================
// Shipping Method
// =============================================================================

/// Delivery speed class. Each variant carries a cost multiplier, see
/// [`ShippingMethod::multiplier_bps`](crate::shipping).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Expedited,
    Priority,
    Express,
}

impl std::fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShippingMethod::Standard => write!(f, "standard"),
            ShippingMethod::Expedited => write!(f, "expedited"),
            ShippingMethod::Priority => write!(f, "priority"),
            ShippingMethod::Express => write!(f, "express"),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// A line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Product identifier, unique within a cart.
    pub product_id: String,

    /// Display name.
    pub product_name: String,

    /// Unit price in cents. Never negative.
    pub price_cents: i64,

    /// Units ordered. Zero is allowed and contributes nothing.
    pub quantity: u32,
}

impl Item {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        price_cents: i64,
        quantity: u32,
    ) -> Self {
        Item {
            product_id: product_id.into(),
            product_name: product_name.into(),
            price_cents,
            quantity,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price().multiply_quantity(u64::from(self.quantity))
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A customer's in-progress order.
///
/// ## Invariants
/// - No two items share a `product_id` (checked by
///   [`validate_unique_products`](crate::validation::validate_unique_products))
/// - `id` is empty until the cart has been stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub id: String,
    pub customer_id: String,
    pub customer_type: CustomerType,
    pub shipping_method: ShippingMethod,
    pub shipping_address: Address,
    pub items: Vec<Item>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty, not yet stored cart with standard shipping.
    pub fn new(
        customer_id: impl Into<String>,
        customer_type: CustomerType,
        shipping_address: Address,
    ) -> Self {
        let now = Utc::now();
        Cart {
            id: String::new(),
            customer_id: customer_id.into(),
            customer_type,
            shipping_method: ShippingMethod::Standard,
            shipping_address,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True once the repository has assigned an id.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Returns the number of distinct items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of all item quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price × quantity over all items.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(Item::line_total).sum()
    }

    /// Looks up an item by product id.
    pub fn find_item(&self, product_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
