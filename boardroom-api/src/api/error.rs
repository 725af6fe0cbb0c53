//! Handler error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// API errors, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    /// Malformed query parameter or request body
    BadRequest(String),
    NotFound(String),
    /// Dataset store failed to read or write
    Storage(String),
}

impl From<boardroom_common::Error> for ApiError {
    fn from(e: boardroom_common::Error) -> Self {
        match e {
            boardroom_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Storage(msg) => {
                error!("Dataset store error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
