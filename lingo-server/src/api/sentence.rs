//! Practice sentence endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceResponse {
    /// Sentence to translate
    pub sentence: String,
    /// Reference translation
    pub full_answer: String,
}

/// GET /api/sentence
///
/// Returns one practice item drawn uniformly from the corpus.
pub async fn get_sentence(State(state): State<AppState>) -> Json<SentenceResponse> {
    let item = {
        let mut rng = rand::thread_rng();
        state.corpus.random_item(&mut rng).clone()
    };

    Json(SentenceResponse {
        sentence: item.source,
        full_answer: item.reference,
    })
}
