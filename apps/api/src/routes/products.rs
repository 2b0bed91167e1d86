//! Product endpoints.
//!
//! ```text
//! GET    /api/products[?include_category=true]        list
//! POST   /api/products                                create (201)
//! GET    /api/products/{id}[?include_category=true]   read
//! PUT    /api/products/{id}                           replace
//! DELETE /api/products/{id}                           delete
//! ```
//!
//! With `include_category=true` each product carries a nested `category`,
//! null when the reference is empty or dangling.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use super::{json_body, path_id, MessageResponse};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use kasir_core::validation::validate_product_input;
use kasir_core::{Product, ProductInput};

const ENTITY: &str = "Product";

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    include_category: Option<String>,
}

impl ProductQuery {
    fn include_category(&self) -> bool {
        self.include_category.as_deref() == Some("true")
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Response> {
    let products = state.db.products();

    if query.include_category() {
        Ok(Json(products.list_with_category().await?).into_response())
    } else {
        Ok(Json(products.list().await?).into_response())
    }
}

async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Response> {
    let id = path_id(id, ENTITY)?;
    let products = state.db.products();

    if query.include_category() {
        products
            .get_by_id_with_category(id)
            .await?
            .map(|p| Json(p).into_response())
            .ok_or_else(|| ApiError::not_found(ENTITY))
    } else {
        products
            .get_by_id(id)
            .await?
            .map(|p| Json(p).into_response())
            .ok_or_else(|| ApiError::not_found(ENTITY))
    }
}

async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let input = json_body(body)?;
    validate_product_input(&input)?;

    let product = state.db.products().create(&input).await?;
    info!(id = product.id, name = %product.name, stock = product.stock, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let id = path_id(id, ENTITY)?;
    let input = json_body(body)?;
    validate_product_input(&input)?;

    let product = state.db.products().update(id, &input).await?;
    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = path_id(id, ENTITY)?;

    state.db.products().delete(id).await?;
    info!(id, "Product deleted");

    Ok(MessageResponse::deleted(ENTITY))
}
