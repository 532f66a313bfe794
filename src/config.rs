use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,https://inventorymanagement-hazel.vercel.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub db_statement_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be
    /// exercised without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            host: var("HOST", "127.0.0.1"),
            port: var("PORT", "5000")
                .parse()
                .context("PORT must be a valid number")?,
            allowed_origins: parse_origins(&var("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS))?,
            db_max_connections: var("DB_MAX_CONNECTIONS", "10")
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            db_acquire_timeout: Duration::from_secs(
                var("DB_ACQUIRE_TIMEOUT_SECS", "5")
                    .parse()
                    .context("DB_ACQUIRE_TIMEOUT_SECS must be a valid number")?,
            ),
            db_statement_timeout: Duration::from_millis(
                var("DB_STATEMENT_TIMEOUT_MS", "5000")
                    .parse()
                    .context("DB_STATEMENT_TIMEOUT_MS must be a valid number")?,
            ),
        })
    }
}

fn parse_origins(raw: &str) -> anyhow::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("ALLOWED_ORIGINS contains an invalid origin: {origin}"))
        })
        .collect()
}
