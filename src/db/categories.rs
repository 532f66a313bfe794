use async_trait::async_trait;

use super::{CategoryRepository, PgStore};
use crate::error::{AppResult, StorageContext};
use crate::models::{Category, NewCategory};

#[async_trait]
impl CategoryRepository for PgStore {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, image FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .storage_context("Failed to fetch categories")
    }

    async fn insert_category(&self, input: &NewCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, image) VALUES ($1, $2) RETURNING id, name, image",
        )
        .bind(&input.name)
        .bind(&input.image)
        .fetch_one(&self.pool)
        .await
        .storage_context("Failed to create category")
    }
}
