//! Health check endpoint for monitoring and load balancers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// `200 {"status":"OK"}` when the database answers, `503` otherwise.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "OK",
                message: "API Running",
            }),
        )
    } else {
        warn!("Health check failed: database unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "UNAVAILABLE",
                message: "Database unavailable",
            }),
        )
    }
}
