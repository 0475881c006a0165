//! # Cart Repository
//!
//! Stores carts as JSON documents.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  carts                                                                  │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  id            TEXT  ◄── lookup key (UUID v4, assigned on create)      │
//! │  customer_id   TEXT  ◄── find_by_customer                              │
//! │  customer_type TEXT                                                    │
//! │  document      TEXT  ◄── the whole Cart as JSON (source of truth)      │
//! │  created_at    TEXT  ◄── find_all ordering                             │
//! │  updated_at    TEXT                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads decode only `document`. The side columns are rewritten together
//! with it on every write so they never disagree.
//!
//! Missing rows are not errors here: lookups return `None` and writes
//! return `false`. The caller decides whether that is a 404.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use basket_core::Cart;

/// Raw row as read back from the `carts` table.
#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    document: String,
}

impl CartRow {
    fn into_cart(self) -> DbResult<Cart> {
        Ok(serde_json::from_str(&self.document)?)
    }
}

/// Repository for cart documents.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Inserts a new cart and returns it as stored.
    ///
    /// A blank id is replaced with a fresh UUID v4; both timestamps are set
    /// to now. Reusing an existing id fails with `UniqueViolation`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let stored = db.carts().create(Cart::new("c-1", CustomerType::Standard, address)).await?;
    /// assert!(stored.is_persisted());
    /// ```
    pub async fn create(&self, mut cart: Cart) -> DbResult<Cart> {
        if cart.id.trim().is_empty() {
            cart.id = Uuid::new_v4().to_string();
        }

        let now = Utc::now();
        cart.created_at = now;
        cart.updated_at = now;

        debug!(id = %cart.id, customer_id = %cart.customer_id, "Creating cart");

        let document = serde_json::to_string(&cart)?;

        sqlx::query(
            r#"
            INSERT INTO carts (id, customer_id, customer_type, document, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&cart.id)
        .bind(&cart.customer_id)
        .bind(cart.customer_type)
        .bind(&document)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("id", cart.id.clone()),
            other => other,
        })?;

        Ok(cart)
    }

    /// Gets a cart by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(cart))` - Cart found
    /// * `Ok(None)` - No cart with that id
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Cart>> {
        debug!(id = %id, "Finding cart");

        let row = sqlx::query_as::<_, CartRow>("SELECT document FROM carts WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CartRow::into_cart).transpose()
    }

    /// Gets every cart, oldest first.
    pub async fn find_all(&self) -> DbResult<Vec<Cart>> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT document FROM carts ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded carts");

        rows.into_iter().map(CartRow::into_cart).collect()
    }

    /// Gets every cart belonging to one customer, oldest first.
    pub async fn find_by_customer(&self, customer_id: &str) -> DbResult<Vec<Cart>> {
        let rows = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT document FROM carts
            WHERE customer_id = ?1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CartRow::into_cart).collect()
    }

    /// Replaces the stored document for `id`.
    ///
    /// The stored cart keeps `id` and its original `created_at` whatever the
    /// incoming cart says; `updated_at` is set to now.
    ///
    /// ## Returns
    /// * `Ok(true)` - Cart replaced
    /// * `Ok(false)` - No cart with that id (nothing written)
    pub async fn update(&self, id: &str, cart: &Cart) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, CartRow>("SELECT document FROM carts WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(existing) = existing else {
            debug!(id = %id, "Update skipped, cart not found");
            return Ok(false);
        };
        let existing = existing.into_cart()?;

        let mut stored = cart.clone();
        stored.id = id.to_string();
        stored.created_at = existing.created_at;
        stored.updated_at = Utc::now();

        let document = serde_json::to_string(&stored)?;

        sqlx::query(
            r#"
            UPDATE carts SET
                customer_id = ?2,
                customer_type = ?3,
                document = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&stored.id)
        .bind(&stored.customer_id)
        .bind(stored.customer_type)
        .bind(&document)
        .bind(stored.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(id = %id, "Cart updated");
        Ok(true)
    }

    /// Deletes the given cart (matched by id).
    pub async fn remove(&self, cart: &Cart) -> DbResult<bool> {
        self.remove_by_id(&cart.id).await
    }

    /// Deletes a cart by id. Returns `false` when nothing was deleted.
    pub async fn remove_by_id(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM carts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, deleted = result.rows_affected(), "Removed cart");
        Ok(result.rows_affected() > 0)
    }

    /// Counts stored carts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM carts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use basket_core::{Address, CustomerType, Item, ShippingMethod};

    async fn repo() -> CartRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().carts()
    }

    fn new_cart(customer_id: &str) -> Cart {
        let mut cart = Cart::new(
            customer_id,
            CustomerType::Premium,
            Address::new("1 Main St", "Austin", "USA"),
        );
        cart.shipping_method = ShippingMethod::Priority;
        cart.items = vec![
            Item::new("prod-1", "Widget", 200, 2),
            Item::new("prod-2", "Gadget", 1099, 1),
        ];
        cart
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_round_trips_document() {
        let repo = repo().await;

        let stored = repo.create(new_cart("customer-1")).await.unwrap();
        assert!(stored.is_persisted());
        assert!(Uuid::parse_str(&stored.id).is_ok());

        let found = repo.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(found, stored);
        assert_eq!(found.items.len(), 2);
        assert_eq!(found.shipping_method, ShippingMethod::Priority);
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_id() {
        let repo = repo().await;
        let mut cart = new_cart("customer-1");
        cart.id = "550e8400-e29b-41d4-a716-446655440000".to_string();

        let stored = repo.create(cart).await.unwrap();
        assert_eq!(stored.id, "550e8400-e29b-41d4-a716-446655440000");
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails() {
        let repo = repo().await;
        let stored = repo.create(new_cart("customer-1")).await.unwrap();

        let mut again = new_cart("customer-2");
        again.id = stored.id.clone();

        let err = repo.create(again).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = repo().await;
        assert!(repo.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_and_by_customer() {
        let repo = repo().await;
        let first = repo.create(new_cart("alice")).await.unwrap();
        let second = repo.create(new_cart("bob")).await.unwrap();
        let third = repo.create(new_cart("alice")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str(), third.id.as_str()]);

        let alice = repo.find_by_customer("alice").await.unwrap();
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|c| c.customer_id == "alice"));

        assert!(repo.find_by_customer("carol").await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let repo = repo().await;
        let stored = repo.create(new_cart("customer-1")).await.unwrap();

        let mut changed = stored.clone();
        changed.customer_type = CustomerType::Standard;
        changed.items = vec![Item::new("prod-9", "Gizmo", 50, 4)];
        // Incoming id and created_at are ignored
        changed.id = "something-else".to_string();
        changed.created_at = Utc::now() + chrono::Duration::days(1);

        assert!(repo.update(&stored.id, &changed).await.unwrap());

        let found = repo.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);
        assert_eq!(found.created_at, stored.created_at);
        assert!(found.updated_at >= stored.updated_at);
        assert_eq!(found.customer_type, CustomerType::Standard);
        assert_eq!(found.items, vec![Item::new("prod-9", "Gizmo", 50, 4)]);
        assert!(repo.find_by_id("something-else").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_cart_returns_false() {
        let repo = repo().await;

        let updated = repo.update("missing", &new_cart("customer-1")).await.unwrap();
        assert!(!updated);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = repo().await;
        let first = repo.create(new_cart("customer-1")).await.unwrap();
        let second = repo.create(new_cart("customer-2")).await.unwrap();

        assert!(repo.remove(&first).await.unwrap());
        assert!(!repo.remove(&first).await.unwrap());
        assert!(repo.remove_by_id(&second.id).await.unwrap());
        assert!(!repo.remove_by_id("missing").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_serialization_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query(
            "INSERT INTO carts (id, customer_id, customer_type, document, created_at, updated_at)
             VALUES ('bad', 'c', 'standard', '{oops', '2024-01-01', '2024-01-01')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.carts().find_by_id("bad").await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }
}
