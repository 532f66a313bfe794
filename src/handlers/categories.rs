use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{
    error::AppResult,
    models::{Category, CreateCategory},
    AppState,
};

pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<Category>>)> {
    let start = Instant::now();
    let categories = state.categories.list_categories().await?;

    info!(
        count = categories.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed categories"
    );

    Ok((StatusCode::OK, Json(categories)))
}

pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategory>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let Json(payload) = payload?;
    let input = payload.validate()?;

    let start = Instant::now();
    let category = state.categories.insert_category(&input).await?;

    info!(
        id = category.id,
        name = %category.name,
        elapsed_ms = start.elapsed().as_millis(),
        "Created category"
    );

    Ok((StatusCode::CREATED, Json(category)))
}
