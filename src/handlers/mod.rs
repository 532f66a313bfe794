pub mod categories;
pub mod products;

use axum::{http::StatusCode, Json};
use serde_json::json;

pub async fn index() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Welcome to Inventory management system.",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "service": "inventory-api" })))
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
