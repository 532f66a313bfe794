use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{
        validation::{parse_id_param, IdParam},
        CreateProduct, Product, ProductFilters,
    },
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    filters: Result<Query<ProductFilters>, QueryRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Query(filters) = filters?;
    let category_id = match filters.category_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_id_param(raw) {
            Some(IdParam::Id(id)) => Some(id),
            // Numeric but no stored category_id can equal it.
            Some(IdParam::Unmatchable) => {
                return Ok((StatusCode::OK, Json(json!({ "products": [] }))));
            }
            None => return Err(AppError::BadRequest("Invalid category_id".to_string())),
        },
    };

    let start = Instant::now();
    let products = state.products.list_products(category_id).await?;

    info!(
        count = products.len(),
        category_id = ?category_id,
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products"
    );

    Ok((StatusCode::OK, Json(json!({ "products": products }))))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProduct>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let Json(payload) = payload?;
    let input = payload.validate()?;

    let start = Instant::now();
    let product = state.products.insert_product(&input).await?;

    info!(
        id = product.id,
        name = %product.name,
        category_id = product.category_id,
        elapsed_ms = start.elapsed().as_millis(),
        "Created product"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let id = match parse_id_param(&id) {
        Some(IdParam::Id(id)) => id,
        Some(IdParam::Unmatchable) => return Err(AppError::NotFound("Product not found".to_string())),
        None => return Err(AppError::BadRequest("Invalid product ID".to_string())),
    };

    let start = Instant::now();
    state.products.delete_product(id).await?;

    info!(id, elapsed_ms = start.elapsed().as_millis(), "Deleted product");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Product deleted successfully" })),
    ))
}
