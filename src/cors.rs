use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone)]
pub struct OriginAllowList {
    origins: Arc<[HeaderValue]>,
}

impl OriginAllowList {
    pub fn new(origins: Vec<HeaderValue>) -> Self {
        Self {
            origins: origins.into(),
        }
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }

    /// CORS response headers for allowed origins.
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.origins.iter().cloned()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true)
    }
}

/// Rejects requests whose `Origin` is not on the allow-list before they are
/// routed. Requests without an `Origin` header pass through.
pub async fn reject_foreign_origins(
    State(allow_list): State<OriginAllowList>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(origin) = req.headers().get(ORIGIN) {
        if !allow_list.allows(origin) {
            warn!(origin = ?origin, path = %req.uri().path(), "Rejected cross-origin request");
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Not allowed by CORS" })),
            )
                .into_response();
        }
    }

    next.run(req).await
}
