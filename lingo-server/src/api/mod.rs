//! HTTP API handlers for lingo-server

pub mod accuracy;
pub mod grammar;
pub mod health;
pub mod policy;
pub mod sentence;
pub mod similar;

pub use accuracy::check_accuracy;
pub use grammar::refine_grammar;
pub use health::health_routes;
pub use policy::get_practice_policy;
pub use sentence::get_sentence;
pub use similar::similar_sentences;

use crate::ApiError;
use axum::extract::rejection::JsonRejection;

/// A required string field is missing when absent, `null` or empty
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Malformed bodies are reported with the endpoint's own validation message
fn rejected(rejection: JsonRejection, message: &str) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    ApiError::BadRequest(message.to_string())
}
