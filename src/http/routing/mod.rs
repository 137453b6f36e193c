pub mod todos;

use axum::{routing::get, Router};

use super::types::ApiError;

/// Top-level router: `/health`, the given feature routes, and a JSON 404 for anything else.
pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(router)
        .fallback(|| async { ApiError::NotFound })
}
