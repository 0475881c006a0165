//! # Routes
//!
//! ```text
//! /health                       → health::health
//! /api/v1/carts                 → carts::{list_carts, create_cart}
//! /api/v1/carts/{id}            → carts::{get_cart, update_cart, delete_cart}
//! /api/v1/carts/{id}/checkout   → carts::checkout
//! ```

pub mod carts;
pub mod health;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Assembles every route with request tracing.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/carts", get(carts::list_carts).post(carts::create_cart))
        .route(
            "/carts/{id}",
            get(carts::get_cart)
                .put(carts::update_cart)
                .delete(carts::delete_cart),
        )
        .route("/carts/{id}/checkout", get(carts::checkout));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
