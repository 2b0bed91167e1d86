//! `POST /api/checkout`: sells a basket of products in one transaction.
//!
//! Either every line is applied (stock decremented, transaction and details
//! written) or nothing is.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use super::json_body;
use crate::error::ApiResult;
use crate::AppState;
use kasir_core::validation::validate_checkout_request;
use kasir_core::{CheckoutRequest, Transaction};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/checkout", post(checkout))
}

async fn checkout(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let request = json_body(body)?;
    validate_checkout_request(&request)?;

    let transaction = state.db.transactions().checkout(&request.items).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, json, seed, send};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_checkout_success() {
        let (app, db) = app().await;
        let ids = seed(&db).await;

        let body = format!(
            r#"{{"items":[{{"product_id":{},"quantity":2}},{{"product_id":{},"quantity":1}}]}}"#,
            ids[0], ids[2]
        );
        let (status, body) = send(&app, "POST", "/api/checkout", Some(&body)).await;
        assert_eq!(status, StatusCode::CREATED);

        let tx = json(&body);
        assert_eq!(tx["total_amount"], 19000);
        let details = tx["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["product_name"], "Indomie Godog");
        assert_eq!(details[0]["subtotal"], 7000);
        assert_eq!(details[1]["product_name"], "kecap");
        assert!(tx["created_at"].is_string());

        let indomie = db.products().get_by_id(ids[0]).await.unwrap().unwrap();
        assert_eq!(indomie.stock, 8);
    }

    #[tokio::test]
    async fn test_checkout_rejections() {
        let (app, db) = app().await;
        let ids = seed(&db).await;

        let (status, body) = send(&app, "POST", "/api/checkout", Some(r#"{"items":[]}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "items is required");

        let (status, body) = send(
            &app,
            "POST",
            "/api/checkout",
            Some(r#"{"items":[{"product_id":1,"quantity":0}]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "quantity must be positive");

        let (status, body) = send(&app, "POST", "/api/checkout", Some("[1,2")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid request body");

        let (status, body) = send(
            &app,
            "POST",
            "/api/checkout",
            Some(r#"{"items":[{"product_id":999,"quantity":1}]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Product not found: 999");

        // First line fits, second does not: nothing may be applied
        let body = format!(
            r#"{{"items":[{{"product_id":{},"quantity":1}},{{"product_id":{},"quantity":11}}]}}"#,
            ids[1], ids[0]
        );
        let (status, body) = send(&app, "POST", "/api/checkout", Some(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Insufficient stock"));

        let vit = db.products().get_by_id(ids[1]).await.unwrap().unwrap();
        assert_eq!(vit.stock, 40);
        assert_eq!(db.transactions().count().await.unwrap(), 0);
    }
}
