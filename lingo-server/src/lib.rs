//! lingo-server library - translation practice API
//!
//! Exposes the router and application state so integration tests can drive
//! the service without binding a socket.

pub mod api;
pub mod error;
pub mod llm;

pub use crate::error::{ApiError, ApiResult};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use lingo_common::{Corpus, PracticePolicy};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::llm::CompletionProvider;

/// Application state shared across HTTP handlers
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Practice corpus, loaded once
    pub corpus: Arc<Corpus>,
    /// Generative-text provider
    pub llm: Arc<dyn CompletionProvider>,
    /// Similar-sentence threshold exposed to clients
    pub policy: PracticePolicy,
}

impl AppState {
    pub fn new(corpus: Corpus, llm: Arc<dyn CompletionProvider>, policy: PracticePolicy) -> Self {
        Self {
            corpus: Arc::new(corpus),
            llm,
            policy,
        }
    }
}

/// CORS policy: one origin, GET/POST, credentials allowed
pub fn cors_layer(frontend_origin: &str) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let origin = HeaderValue::from_str(frontend_origin)?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Build application router
///
/// Panics inside any handler are caught and turned into a generic 500.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/sentence", get(api::get_sentence))
        .route("/api/check-accuracy", post(api::check_accuracy))
        .route("/api/similar-sentences", post(api::similar_sentences))
        .route("/api/refine-grammar", post(api::refine_grammar))
        .route("/api/practice-policy", get(api::get_practice_policy))
        .merge(api::health_routes())
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
