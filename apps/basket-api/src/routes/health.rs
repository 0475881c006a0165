//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: &'static str,
    pub database: bool,
}

/// `GET /health`. Always 200; a dead database shows as `degraded`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.db.health_check().await;

    Json(HealthResponse {
        status: if database { "healthy" } else { "degraded" },
        database,
    })
}
