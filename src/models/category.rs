use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{optional_image, required_name};
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
}

/// Validated input for a category insert.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub image: Option<String>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateCategory {
    pub name: Option<Value>,
    pub image: Option<Value>,
}

impl CreateCategory {
    pub fn validate(self) -> AppResult<NewCategory> {
        Ok(NewCategory {
            name: required_name(self.name)?,
            image: optional_image(self.image)?,
        })
    }
}
