//! # Cart Service
//!
//! Orchestrates validation, storage and checkout for the cart endpoints.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CreateCartDto                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AddressValidator.is_valid(customer.address)  ── no ──► 400            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate customer id + items (unique product ids) ── no ──► 400       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartRepository.create ──► ShoppingCartDto (201)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written unless every check passes.

use std::sync::Arc;

use basket_core::validation::{validate_address, validate_customer_id, validate_items};
use basket_core::{
    AddressValidator, Cart, CheckoutEngine, CoreError, Item, ValidationError, MAX_CART_ITEMS,
    MAX_ITEM_QUANTITY,
};
use basket_db::Database;
use tracing::{debug, info};

use crate::dto::{CheckoutDto, CreateCartDto, ShoppingCartDto, UpdateCartDto};
use crate::error::ApiError;

/// Cart use cases behind the HTTP routes.
#[derive(Debug, Clone)]
pub struct CartService {
    db: Database,
    checkout: Arc<CheckoutEngine>,
    validator: AddressValidator,
}

impl CartService {
    pub fn new(db: Database, checkout: Arc<CheckoutEngine>, validator: AddressValidator) -> Self {
        CartService {
            db,
            checkout,
            validator,
        }
    }

    /// Every stored cart, oldest first.
    pub async fn get_all(&self) -> Result<Vec<ShoppingCartDto>, ApiError> {
        let carts = self.db.carts().find_all().await?;
        Ok(carts.into_iter().map(ShoppingCartDto::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<ShoppingCartDto, ApiError> {
        Ok(self.load(id).await?.into())
    }

    /// Computes subtotal, shipping, discount and total for a stored cart.
    pub async fn calculate_totals(&self, id: &str) -> Result<CheckoutDto, ApiError> {
        let cart = self.load(id).await?;
        let result = self.checkout.calculate_totals(&cart);

        debug!(
            id = %id,
            subtotal = %result.subtotal,
            shipping = %result.shipping_cost,
            discount = %result.customer_discount,
            total = %result.total,
            "Checkout calculated"
        );

        Ok(result.into())
    }

    /// Validates and stores a new cart.
    pub async fn create(&self, dto: CreateCartDto) -> Result<ShoppingCartDto, ApiError> {
        let cart = self.build_cart(dto)?;
        let stored = self.db.carts().create(cart).await?;

        info!(id = %stored.id, customer_id = %stored.customer_id, "Cart created");
        Ok(stored.into())
    }

    /// Replaces a stored cart with the validated body.
    pub async fn update(&self, id: &str, dto: UpdateCartDto) -> Result<ShoppingCartDto, ApiError> {
        let cart = self.build_cart(dto)?;

        if !self.db.carts().update(id, &cart).await? {
            return Err(CoreError::CartNotFound(id.to_string()).into());
        }

        info!(id = %id, "Cart updated");
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        if !self.db.carts().remove_by_id(id).await? {
            return Err(CoreError::CartNotFound(id.to_string()).into());
        }

        info!(id = %id, "Cart deleted");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Cart, ApiError> {
        self.db
            .carts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::CartNotFound(id.to_string()).into())
    }

    /// Turns a request body into an unsaved cart, rejecting bad input.
    fn build_cart(&self, dto: CreateCartDto) -> Result<Cart, CoreError> {
        let customer = dto.customer;

        let address = match customer.address {
            Some(address) if self.validator.is_valid(Some(&address)) => address,
            Some(address) => {
                let reason = validate_address(&address)
                    .err()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "address is invalid".to_string());
                return Err(CoreError::InvalidAddress { reason });
            }
            None => {
                return Err(CoreError::InvalidAddress {
                    reason: "address is required".to_string(),
                })
            }
        };

        validate_customer_id(&customer.id)?;

        let items: Vec<Item> = dto.items.into_iter().map(Item::from).collect();
        validate_items(&items).map_err(|e| item_error(e, &items))?;

        let mut cart = Cart::new(customer.id, customer.customer_type, address);
        cart.shipping_method = dto.shipping_method;
        cart.items = items;
        Ok(cart)
    }
}

/// Lifts item-list failures with a dedicated domain error out of the
/// generic validation wrapper.
fn item_error(err: ValidationError, items: &[Item]) -> CoreError {
    match err {
        ValidationError::Duplicate { value, .. } => CoreError::DuplicateProduct { product_id: value },
        ValidationError::OutOfRange { field, .. } if field == "items" => {
            CoreError::CartTooLarge { max: MAX_CART_ITEMS }
        }
        ValidationError::OutOfRange { field, min, max } if field == "quantity" => {
            match items.iter().find(|item| item.quantity > MAX_ITEM_QUANTITY) {
                Some(item) => CoreError::QuantityTooLarge {
                    requested: item.quantity,
                    max: MAX_ITEM_QUANTITY,
                },
                None => CoreError::Validation(ValidationError::OutOfRange { field, min, max }),
            }
        }
        other => CoreError::Validation(other),
    }
}
