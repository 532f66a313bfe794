use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{optional_image, positive_price, required_category_id, required_name};
use crate::error::AppResult;

/// Product row joined with the owning category's name.
///
/// `category_name` is not stored; it is `None` when the join misses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub category_name: Option<String>,
}

/// Validated input for a product insert.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub category_id: i64,
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateProduct {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub image: Option<Value>,
    pub category_id: Option<Value>,
}

impl CreateProduct {
    /// Checks name, price, category and image in that order and stops at
    /// the first failure.
    pub fn validate(self) -> AppResult<NewProduct> {
        let name = required_name(self.name)?;
        let price = positive_price(self.price)?;
        let category_id = required_category_id(self.category_id)?;
        let image = optional_image(self.image)?;

        Ok(NewProduct {
            name,
            price,
            image,
            category_id,
        })
    }
}

// ── Query parameters ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ProductFilters {
    pub category_id: Option<String>,
}
