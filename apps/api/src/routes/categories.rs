//! Category endpoints.
//!
//! ```text
//! GET    /api/categories                 list
//! POST   /api/categories                 create (201)
//! GET    /api/categories/{id}            read
//! PUT    /api/categories/{id}            replace
//! DELETE /api/categories/{id}            delete (products keep their id)
//! GET    /api/categories/{id}/products   products in the category
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use super::{json_body, path_id, MessageResponse};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use kasir_core::validation::validate_category_input;
use kasir_core::{Category, CategoryInput, ProductWithCategory};

const ENTITY: &str = "Category";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/api/categories/{id}/products", get(list_category_products))
}

async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.db.categories().list().await?;
    Ok(Json(categories))
}

async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let id = path_id(id, ENTITY)?;

    state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ENTITY))
}

async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let input = json_body(body)?;
    validate_category_input(&input)?;

    let category = state.db.categories().create(&input).await?;
    info!(id = category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let id = path_id(id, ENTITY)?;
    let input = json_body(body)?;
    validate_category_input(&input)?;

    let category = state.db.categories().update(id, &input).await?;
    Ok(Json(category))
}

async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(id, ENTITY)?;

    state.db.categories().delete(id).await?;
    info!(id, "Category deleted");

    Ok(MessageResponse::deleted(ENTITY))
}

async fn list_category_products(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<ProductWithCategory>>> {
    let id = path_id(id, ENTITY)?;

    let products = state.db.products().list_by_category(id).await?;
    Ok(Json(products))
}
