use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};

mod config;
mod cors;
mod db;
mod error;
mod handlers;
mod models;
#[cfg(test)]
mod test_support;

use crate::config::Config;
use crate::cors::OriginAllowList;
use crate::db::{CategoryRepository, PgStore, ProductRepository};

/// Shared application state, cheap to clone (repositories behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,inventory_api=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let pool = db::connect(&config).await?;
    let store = Arc::new(PgStore::new(pool));
    let state = AppState {
        categories: store.clone(),
        products: store,
    };

    let origins = OriginAllowList::new(config.allowed_origins.clone());
    info!(origins = ?config.allowed_origins, "CORS allow-list loaded");

    let app = build_router(state, &origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState, origins: &OriginAllowList) -> Router {
    Router::new()
        // ── Root ────────────────────────────────────────────────────────────
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))

        // ── Categories ──────────────────────────────────────────────────────
        .route(
            "/categories",
            get(handlers::categories::list_categories)
                .post(handlers::categories::create_category),
        )

        // ── Products ────────────────────────────────────────────────────────
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/products/:id", delete(handlers::products::delete_product))
        .fallback(handlers::not_found)

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(origins.cors_layer())
        .layer(middleware::from_fn_with_state(
            origins.clone(),
            cors::reject_foreign_origins,
        ))
        .layer(CatchPanicLayer::custom(unhandled_error as fn(_) -> _))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Last-resort handler for anything that escaped a request handler.
fn unhandled_error(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "Unhandled error while serving request");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Something went wrong!" })),
    )
        .into_response()
}
