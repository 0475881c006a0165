//! # basket-api
//!
//! HTTP server for the Basket shopping cart service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Basket API Server                               │
//! │                                                                         │
//! │  Client ───► axum Router (TraceLayer) ───► routes ───► CartService     │
//! │                                                            │            │
//! │                               ┌────────────────────────────┤            │
//! │                               ▼                            ▼            │
//! │                        CheckoutEngine               CartRepository      │
//! │                        (basket-core)                (basket-db)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Endpoints
//! - `GET    /health`
//! - `GET    /api/v1/carts`
//! - `POST   /api/v1/carts`
//! - `GET    /api/v1/carts/{id}`
//! - `PUT    /api/v1/carts/{id}`
//! - `DELETE /api/v1/carts/{id}`
//! - `GET    /api/v1/carts/{id}/checkout`
//!
//! ## Configuration
//! See [`config`]: TOML file plus `BASKET_*` environment variables.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use basket_core::{Address, AddressValidator, CheckoutEngine, ShippingCalculator};
use basket_db::Database;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ApiError, ErrorCode};
pub use services::CartService;

/// Shared application state, cloned into every handler.
///
/// The checkout engine holds only the immutable depot address, so sharing it
/// behind an `Arc` needs no lock.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub checkout: Arc<CheckoutEngine>,
    pub validator: AddressValidator,
}

impl AppState {
    /// Builds state for a depot address.
    pub fn new(db: Database, depot: Address) -> Self {
        AppState {
            db,
            checkout: Arc::new(CheckoutEngine::new(ShippingCalculator::new(depot))),
            validator: AddressValidator,
        }
    }

    /// Cart use cases over this state.
    pub fn carts(&self) -> CartService {
        CartService::new(self.db.clone(), self.checkout.clone(), self.validator)
    }
}

/// Builds the full application router.
pub fn create_router(state: AppState) -> Router {
    routes::router(state)
}
