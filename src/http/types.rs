use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::validate::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {} invalid field(s)", .0.len())]
    BadRequest(Vec<ValidationError>),
    #[error("item not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// `Ok` for an empty error list, otherwise a 400 carrying every entry.
    pub fn check(errors: Vec<ValidationError>) -> Result<(), ApiError> {
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(?errors, "validation failed");
            Err(ApiError::BadRequest(errors))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Bad Request", "errorList": errors })),
            )
                .into_response(),
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "Item not found" }))).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}
