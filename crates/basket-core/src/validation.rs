//! # Validation Module
//!
//! Input validation for carts, items and addresses.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum Json extractor)                                   │
//! │  ├── Malformed JSON, wrong enum names → 422                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── AddressValidator (street / city / country non-blank)              │
//! │  ├── Unique product ids per cart                                       │
//! │  └── Item field rules → 400                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── PRIMARY KEY / NOT NULL constraints                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::validation::AddressValidator;
//! use basket_core::Address;
//!
//! let address = Address::new("1 Main St", "Anywhere", "USA");
//! assert!(AddressValidator.is_valid(Some(&address)));
//! assert!(!AddressValidator.is_valid(None));
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{Address, Item};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Address Validator
// =============================================================================

/// Checks that a mailing address has every required field.
///
/// Stateless; a unit struct so it can be injected where the service expects
/// a validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressValidator;

impl AddressValidator {
    /// Returns true only if the address is present and its street, city and
    /// country are all non-blank.
    pub fn is_valid(&self, address: Option<&Address>) -> bool {
        match address {
            Some(address) => validate_address(address).is_ok(),
            None => false,
        }
    }
}

/// Validates an address, naming the first offending field.
///
/// ## Rules
/// - street, city and country are required
/// - empty and whitespace-only values count as missing
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_address;
/// use basket_core::{Address, ValidationError};
///
/// let address = Address::new("1 Main St", "   ", "USA");
/// assert_eq!(
///     validate_address(&address),
///     Err(ValidationError::required("city"))
/// );
/// ```
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    require_non_blank("street", &address.street)?;
    require_non_blank("city", &address.city)?;
    require_non_blank("country", &address.country)?;
    Ok(())
}

fn require_non_blank(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

fn require_bounded(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    require_non_blank(field, value)?;

    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or blank
/// - At most 50 characters
pub fn validate_product_id(product_id: &str) -> ValidationResult<()> {
    require_bounded("product_id", product_id, 50)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or blank
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    require_bounded("product_name", name, 200)
}

/// Validates a customer identifier.
pub fn validate_customer_id(customer_id: &str) -> ValidationResult<()> {
    require_bounded("customer_id", customer_id, 100)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed MAX_PRICE_CENTS
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price_cents".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Zero is allowed (contributes nothing to shipping or subtotal)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of distinct items).
pub fn validate_cart_size(items: usize) -> ValidationResult<()> {
    if items > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

/// Rejects a list where two items share a product id.
///
/// The error names the first repeated id, in list order.
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_unique_products;
/// use basket_core::Item;
///
/// let items = vec![
///     Item::new("prod-1", "A", 100, 1),
///     Item::new("prod-1", "A again", 100, 2),
/// ];
/// assert!(validate_unique_products(&items).is_err());
/// ```
pub fn validate_unique_products(items: &[Item]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        if !seen.insert(item.product_id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "product_id".to_string(),
                value: item.product_id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a single item's fields.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_product_id(&item.product_id)?;
    validate_product_name(&item.product_name)?;
    validate_price_cents(item.price_cents)?;
    validate_quantity(item.quantity)?;
    Ok(())
}

/// Validates the full item list of a cart: size, each item, uniqueness.
pub fn validate_items(items: &[Item]) -> ValidationResult<()> {
    validate_cart_size(items.len())?;

    for item in items {
        validate_item(item)?;
    }

    validate_unique_products(items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn address(street: &str, city: &str, country: &str) -> Address {
        Address::new(street, city, country)
    }

    #[test]
    fn test_valid_address() {
        let validator = AddressValidator;
        assert!(validator.is_valid(Some(&address("1 Main St", "Anywhere", "USA"))));
    }

    #[test]
    fn test_absent_address_is_invalid() {
        assert!(!AddressValidator.is_valid(None));
    }

    #[test]
    fn test_address_with_missing_empty_or_blank_fields_is_invalid() {
        let cases = [
            Address::default(),
            address("", "Anywhere", "USA"),
            address("1 Main St", "", "USA"),
            address("1 Main St", "Anywhere", ""),
            address("", "", ""),
            address("   ", "Anywhere", "USA"),
            address("1 Main St", "\t", "USA"),
            address("1 Main St", "Anywhere", " \n "),
        ];

        for case in &cases {
            assert!(!AddressValidator.is_valid(Some(case)), "{case:?} should be invalid");
        }
    }

    #[test]
    fn test_validate_address_names_first_bad_field() {
        assert_eq!(
            validate_address(&address("", "", "")),
            Err(ValidationError::required("street"))
        );
        assert_eq!(
            validate_address(&address("1 Main St", "Anywhere", " ")),
            Err(ValidationError::required("country"))
        );
    }

    #[test]
    fn test_validate_product_fields() {
        assert!(validate_product_id("prod-1").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id(&"A".repeat(51)).is_err());

        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("  ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price_and_quantity() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(i64::MAX / 2).is_err());

        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_unique_products() {
        let items = vec![
            Item::new("1", "One", 100, 1),
            Item::new("2", "Two", 100, 1),
            Item::new("1", "One again", 100, 1),
        ];

        assert_eq!(
            validate_unique_products(&items),
            Err(ValidationError::Duplicate {
                field: "product_id".to_string(),
                value: "1".to_string(),
            })
        );
        assert!(validate_unique_products(&items[..2]).is_ok());
        assert!(validate_unique_products(&[]).is_ok());
    }

    #[test]
    fn test_validate_items_checks_size() {
        let items: Vec<Item> = (0..=MAX_CART_ITEMS)
            .map(|i| Item::new(format!("p{i}"), "Thing", 100, 1))
            .collect();

        assert!(validate_items(&items).is_err());
        assert!(validate_items(&items[..MAX_CART_ITEMS]).is_ok());
    }
}
