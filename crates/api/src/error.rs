//! API error taxonomy

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validate::ValidationError;

/// Errors surfaced by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Missing X-User-Id header")]
    MissingUser,

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::Validation(_) | ApiError::MissingUser => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Storage(e) => {
                error!("storage failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
