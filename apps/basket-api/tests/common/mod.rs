//! Shared helpers for the HTTP tests: an app over an in-memory database,
//! request shortcuts and cart body builders.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use basket_api::{create_router, AppState};
use basket_core::Address;
use basket_db::{Database, DbConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn depot() -> Address {
    Address::new("1234 Deerfield St", "Dallas", "USA")
}

/// Router plus the database behind it, so tests can inspect storage.
pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

pub async fn test_app() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let router = create_router(AppState::new(db.clone(), depot()));
    TestApp { router, db }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send_json("POST", uri, body).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send_json("PUT", uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Sends a request; the body is parsed as JSON, or `Value::Null` when
    /// empty or not JSON.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn address(street: &str, city: &str, country: &str) -> Value {
    json!({ "street": street, "city": city, "country": country })
}

pub fn item(product_id: &str, price_cents: i64, quantity: u32) -> Value {
    json!({
        "productId": product_id,
        "productName": format!("Product {product_id}"),
        "priceCents": price_cents,
        "quantity": quantity,
    })
}

/// Builds a `CreateCartDto` body with sensible defaults: a standard
/// customer in the depot's city, standard shipping, no items.
pub struct CartBuilder {
    customer_id: String,
    customer_type: String,
    address: Option<Value>,
    shipping_method: String,
    items: Vec<Value>,
}

impl Default for CartBuilder {
    fn default() -> Self {
        CartBuilder {
            customer_id: "customer-1".to_string(),
            customer_type: "standard".to_string(),
            address: Some(address("5 Elm St", "Dallas", "USA")),
            shipping_method: "standard".to_string(),
            items: Vec::new(),
        }
    }
}

impl CartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_id(mut self, id: &str) -> Self {
        self.customer_id = id.to_string();
        self
    }

    pub fn premium(mut self) -> Self {
        self.customer_type = "premium".to_string();
        self
    }

    pub fn address(mut self, address: Option<Value>) -> Self {
        self.address = address;
        self
    }

    pub fn shipping_method(mut self, method: &str) -> Self {
        self.shipping_method = method.to_string();
        self
    }

    pub fn item(mut self, item: Value) -> Self {
        self.items.push(item);
        self
    }

    pub fn build(self) -> Value {
        let mut customer = json!({
            "id": self.customer_id,
            "customerType": self.customer_type,
        });
        if let Some(address) = self.address {
            customer["address"] = address;
        }

        json!({
            "customer": customer,
            "items": self.items,
            "shippingMethod": self.shipping_method,
        })
    }
}
