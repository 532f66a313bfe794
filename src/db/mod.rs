use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Category, NewCategory, NewProduct, Product};

mod categories;
#[cfg(test)]
pub mod memory;
mod products;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ordered by id. The order is not part of the API contract.
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// Inserts a category; duplicate names are allowed.
    async fn insert_category(&self, input: &NewCategory) -> AppResult<Category>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products joined with their category name, optionally restricted to
    /// one category.
    async fn list_products(&self, category_id: Option<i64>) -> AppResult<Vec<Product>>;

    /// Inserts a product. A `category_id` with no matching category yields
    /// `AppError::BadRequest`.
    async fn insert_product(&self, input: &NewProduct) -> AppResult<Product>;

    /// Deletes one product, or `AppError::NotFound` if no row matched.
    async fn delete_product(&self, id: i64) -> AppResult<()>;
}

/// Repositories backed by a shared Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Opens the pool, applying the acquire and per-statement timeouts, then
/// runs the schema bootstrap.
pub async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let statement_timeout = config.db_statement_timeout.as_millis().to_string();
    let options = PgConnectOptions::from_str(&config.database_url)
        .context("DATABASE_URL is not a valid Postgres connection string")?
        .options([("statement_timeout", statement_timeout.as_str())]);

    info!(
        max_connections = config.db_max_connections,
        statement_timeout_ms = %statement_timeout,
        "Connecting to PostgreSQL..."
    );
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect_with(options)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!("Database connection pool established.");

    info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to apply schema")?;
    info!("Migrations complete.");

    Ok(pool)
}
