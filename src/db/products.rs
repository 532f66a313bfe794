use async_trait::async_trait;

use super::{PgStore, ProductRepository};
use crate::error::{AppError, AppResult, StorageContext};
use crate::models::{NewProduct, Product};

#[async_trait]
impl ProductRepository for PgStore {
    async fn list_products(&self, category_id: Option<i64>) -> AppResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.name, p.price::float8 AS price, p.image, p.category_id, p.created_at,
                   c.name AS category_name
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE ($1::bigint IS NULL OR p.category_id = $1)
            ORDER BY p.id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .storage_context("Failed to fetch products")
    }

    async fn insert_product(&self, input: &NewProduct) -> AppResult<Product> {
        // Insert and resolve the category name in one statement.
        sqlx::query_as::<_, Product>(
            r#"
            WITH inserted AS (
                INSERT INTO products (name, price, image, category_id)
                VALUES ($1, $2::float8::numeric, $3, $4)
                RETURNING id, name, price, image, category_id, created_at
            )
            SELECT i.id, i.name, i.price::float8 AS price, i.image, i.category_id, i.created_at,
                   c.name AS category_name
            FROM inserted i
            LEFT JOIN categories c ON c.id = i.category_id
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(&input.image)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let dangling_category = e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());
            if dangling_category {
                AppError::unknown_category(input.category_id)
            } else {
                AppError::storage("Failed to create product", e)
            }
        })
    }

    async fn delete_product(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .storage_context("Failed to delete product")?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }
}
