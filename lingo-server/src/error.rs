//! Error types for lingo-server
//!
//! Every failure a handler can report maps to a JSON body. Internal detail
//! (upstream errors, panic payloads) is logged server-side and never sent to
//! the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;

/// Generic message returned for any unexpected server fault
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request field (400, `{"error"}`)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Generative model call failed (500, `{"error"}`)
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Operation failed, reported in the success envelope (500, `{"success": false, "error"}`)
    #[error("Request failed: {0}")]
    Failed(String),

    /// Unexpected fault; the detail is logged, the caller sees a generic message
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Upstream(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            ApiError::Failed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "error": msg }),
            ),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": INTERNAL_ERROR_MESSAGE }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Response for a panic caught anywhere in the request pipeline
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        "non-string panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
