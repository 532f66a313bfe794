//! Router harness for handler tests, wired to an in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{build_router, cors::OriginAllowList, db::memory::MemoryStore, AppState};

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            categories: store.clone(),
            products: store.clone(),
        };
        let origins = OriginAllowList::new(vec![HeaderValue::from_static(ALLOWED_ORIGIN)]);
        Self {
            router: build_router(state, &origins),
            store,
        }
    }
}

/// Sends one request and decodes the body as JSON (`Value::Null` when empty).
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let response = router
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn send_json(router: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        method,
        uri,
        &[("content-type", "application/json")],
        &body.to_string(),
    )
    .await
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, &[], "").await
}
