//! # Request and Response Bodies
//!
//! DTOs (Data Transfer Objects) for the HTTP API. They decouple the wire
//! contract from the domain types and use camelCase for JavaScript clients.
//!
//! ## Mapping
//! ```text
//! CreateCartDto ──► Cart ──► CartRepository ──► Cart ──► ShoppingCartDto
//!                                                 │
//!                                                 ▼
//!                                CheckoutEngine ──► CheckoutResult ──► CheckoutDto
//! ```
//!
//! Money leaves the API as integer cents (`*Cents` fields).

use basket_core::{Address, Cart, CheckoutResult, CustomerType, Item, ShippingMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Items
// =============================================================================

/// One cart line as sent and received by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemDto {
    pub product_id: String,
    pub product_name: String,
    pub price_cents: i64,
    /// Defaults to 1 when omitted.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        ItemDto {
            product_id: item.product_id,
            product_name: item.product_name,
            price_cents: item.price_cents,
            quantity: item.quantity,
        }
    }
}

impl From<ItemDto> for Item {
    fn from(dto: ItemDto) -> Self {
        Item::new(dto.product_id, dto.product_name, dto.price_cents, dto.quantity)
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Who the cart belongs to and where it ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDto {
    pub id: String,
    #[serde(default)]
    pub customer_type: CustomerType,
    /// Absent addresses are accepted by the parser and rejected by the
    /// address validator, so clients get a 400 rather than a parse error.
    #[serde(default)]
    pub address: Option<Address>,
}

/// Body of `POST /api/v1/carts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateCartDto {
    pub customer: CustomerDto,
    #[serde(default)]
    pub items: Vec<ItemDto>,
    #[serde(default)]
    pub shipping_method: ShippingMethod,
}

/// Body of `PUT /api/v1/carts/{id}`. An update replaces the whole cart, so
/// it carries the same fields as a create.
pub type UpdateCartDto = CreateCartDto;

// =============================================================================
// Responses
// =============================================================================

/// A stored cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShoppingCartDto {
    pub id: String,
    pub customer_id: String,
    pub customer_type: CustomerType,
    pub shipping_method: ShippingMethod,
    pub shipping_address: Address,
    pub items: Vec<ItemDto>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for ShoppingCartDto {
    fn from(cart: Cart) -> Self {
        ShoppingCartDto {
            id: cart.id,
            customer_id: cart.customer_id,
            customer_type: cart.customer_type,
            shipping_method: cart.shipping_method,
            shipping_address: cart.shipping_address,
            items: cart.items.into_iter().map(ItemDto::from).collect(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

/// Checkout totals for a cart, all in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutDto {
    pub shopping_cart: ShoppingCartDto,
    pub subtotal_cents: i64,
    pub shipping_cost_cents: i64,
    pub customer_discount_cents: i64,
    pub total_cents: i64,
}

impl From<CheckoutResult> for CheckoutDto {
    fn from(result: CheckoutResult) -> Self {
        CheckoutDto {
            subtotal_cents: result.subtotal.cents(),
            shipping_cost_cents: result.shipping_cost.cents(),
            customer_discount_cents: result.customer_discount.cents(),
            total_cents: result.total.cents(),
            shopping_cart: result.cart.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_defaults() {
        let dto: CreateCartDto = serde_json::from_str(
            r#"{
                "customer": { "id": "c-1" },
                "items": [{ "productId": "p-1", "productName": "Widget", "priceCents": 250 }]
            }"#,
        )
        .unwrap();

        assert_eq!(dto.customer.customer_type, CustomerType::Standard);
        assert!(dto.customer.address.is_none());
        assert_eq!(dto.shipping_method, ShippingMethod::Standard);
        assert_eq!(dto.items[0].quantity, 1);
    }

    #[test]
    fn test_cart_dto_is_camel_case() {
        let mut cart = Cart::new(
            "c-1",
            CustomerType::Premium,
            Address::new("1 Main St", "Dallas", "USA"),
        );
        cart.id = "cart-1".to_string();
        cart.items.push(Item::new("p-1", "Widget", 250, 2));

        let json = serde_json::to_value(ShoppingCartDto::from(cart)).unwrap();
        assert_eq!(json["customerId"], "c-1");
        assert_eq!(json["customerType"], "premium");
        assert_eq!(json["shippingMethod"], "standard");
        assert_eq!(json["shippingAddress"]["city"], "Dallas");
        assert_eq!(json["items"][0]["priceCents"], 250);
    }
}
