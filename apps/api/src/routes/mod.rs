//! HTTP route handlers.
//!
//! Each submodule exposes a `router()` that is merged here. Handlers take
//! their extractors as `Result<_, Rejection>` so malformed input turns into
//! the plain-text 400 bodies clients expect instead of axum's defaults.

pub mod categories;
pub mod checkout;
pub mod health;
pub mod products;
pub mod report;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path};
use axum::Router;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// All routes, without state attached.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(checkout::router())
        .merge(report::router())
}

/// Body of a successful DELETE.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(entity: &str) -> Json<Self> {
        Json(MessageResponse {
            message: format!("{} deleted successfully", entity),
        })
    }
}

/// Unwraps a JSON body, answering 400 "Invalid request body" on any
/// syntax, type or content-type problem.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected request body");
            Err(ApiError::bad_request("Invalid request body"))
        }
    }
}

/// Unwraps an integer path id, answering 400 "Invalid <Entity> ID".
pub(crate) fn path_id(id: Result<Path<i64>, PathRejection>, entity: &str) -> ApiResult<i64> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected path id");
            Err(ApiError::bad_request(format!("Invalid {} ID", entity)))
        }
    }
}
