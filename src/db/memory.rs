//! In-memory repositories used by the HTTP tests in place of Postgres.
//!
//! Mirrors the database's observable behavior: sequential ids, the
//! category foreign key on insert, and the LEFT JOIN for `category_name`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CategoryRepository, ProductRepository};
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, NewProduct, Product};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_category_id: i64,
    next_product_id: i64,
    unavailable: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail as if the database were unreachable.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.tables.write().await.unavailable = unavailable;
    }

    pub async fn product_count(&self) -> usize {
        self.tables.read().await.products.len()
    }
}

impl Tables {
    fn check(&self, context: &'static str) -> AppResult<()> {
        if self.unavailable {
            return Err(AppError::storage(context, "connection refused"));
        }
        Ok(())
    }

    fn category_name(&self, id: i64) -> Option<String> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let tables = self.tables.read().await;
        tables.check("Failed to fetch categories")?;
        Ok(tables.categories.clone())
    }

    async fn insert_category(&self, input: &NewCategory) -> AppResult<Category> {
        let mut tables = self.tables.write().await;
        tables.check("Failed to create category")?;
        tables.next_category_id += 1;
        let category = Category {
            id: tables.next_category_id,
            name: input.name.clone(),
            image: input.image.clone(),
        };
        tables.categories.push(category.clone());
        Ok(category)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list_products(&self, category_id: Option<i64>) -> AppResult<Vec<Product>> {
        let tables = self.tables.read().await;
        tables.check("Failed to fetch products")?;
        Ok(tables
            .products
            .iter()
            .filter(|p| category_id.map_or(true, |id| p.category_id == id))
            .map(|p| Product {
                category_name: tables.category_name(p.category_id),
                ..p.clone()
            })
            .collect())
    }

    async fn insert_product(&self, input: &NewProduct) -> AppResult<Product> {
        let mut tables = self.tables.write().await;
        tables.check("Failed to create product")?;
        let category_name = tables
            .category_name(input.category_id)
            .ok_or_else(|| AppError::unknown_category(input.category_id))?;

        tables.next_product_id += 1;
        let product = Product {
            id: tables.next_product_id,
            name: input.name.clone(),
            price: input.price,
            image: input.image.clone(),
            category_id: input.category_id,
            created_at: Utc::now(),
            category_name: Some(category_name),
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.check("Failed to delete product")?;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(AppError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }
}
