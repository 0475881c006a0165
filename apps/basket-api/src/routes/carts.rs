//! Cart endpoints. Handlers only extract, delegate to
//! [`CartService`](crate::services::CartService) and pick the status code.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::dto::{CheckoutDto, CreateCartDto, ShoppingCartDto, UpdateCartDto};
use crate::error::ApiError;
use crate::AppState;

/// `GET /api/v1/carts`
pub async fn list_carts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShoppingCartDto>>, ApiError> {
    let carts = state.carts().get_all().await?;
    debug!(count = carts.len(), "Listing carts");
    Ok(Json(carts))
}

/// `GET /api/v1/carts/{id}`
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingCartDto>, ApiError> {
    Ok(Json(state.carts().get_by_id(&id).await?))
}

/// `GET /api/v1/carts/{id}/checkout`
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CheckoutDto>, ApiError> {
    Ok(Json(state.carts().calculate_totals(&id).await?))
}

/// `POST /api/v1/carts` → 201 with the stored cart.
pub async fn create_cart(
    State(state): State<AppState>,
    Json(body): Json<CreateCartDto>,
) -> Result<(StatusCode, Json<ShoppingCartDto>), ApiError> {
    let cart = state.carts().create(body).await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// `PUT /api/v1/carts/{id}`
pub async fn update_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCartDto>,
) -> Result<Json<ShoppingCartDto>, ApiError> {
    Ok(Json(state.carts().update(&id, body).await?))
}

/// `DELETE /api/v1/carts/{id}` → 204.
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.carts().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
