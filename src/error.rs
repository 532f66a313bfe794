use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing client input. Never reaches a repository.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Data-store failure, prefixed with the operation that failed.
    #[error("{context}: {detail}")]
    Storage { context: &'static str, detail: String },

    /// Request body could not be decoded as JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}

impl AppError {
    pub fn storage(context: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::Storage {
            context,
            detail: err.to_string(),
        }
    }

    pub fn unknown_category(id: i64) -> Self {
        AppError::BadRequest(format!("Category {} does not exist", id))
    }
}

/// Attaches the failing operation's name to a `sqlx` error.
pub trait StorageContext<T> {
    fn storage_context(self, context: &'static str) -> AppResult<T>;
}

impl<T> StorageContext<T> for Result<T, sqlx::Error> {
    fn storage_context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|e| AppError::storage(context, e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::InvalidBody(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid JSON body", "message": detail }),
            ),
            AppError::InvalidQuery(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid query string", "message": detail }),
            ),
            AppError::Storage { .. } => {
                tracing::error!(error = %self, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "message": self.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}
