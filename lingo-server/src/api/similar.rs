//! Similar sentences endpoint
//!
//! Asks the generative model for three graded example sentences, a usage tip
//! and a context paragraph built around the reference sentence.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use lingo_common::{parse_similar_sentences, prompts, SimilarSentences};
use serde::{Deserialize, Serialize};

use super::{present, rejected};
use crate::{ApiError, ApiResult, AppState};

const SENTENCE_REQUIRED: &str = "Sentence is required";
const GENERATION_FAILED: &str = "Failed to generate similar sentences";

#[derive(Debug, Deserialize)]
pub struct SimilarSentencesRequest {
    #[serde(default)]
    pub sentence: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarSentencesResponse {
    /// Basic, intermediate and advanced examples, in that order
    pub similar_sentences: [String; 3],
    pub tip: String,
    pub context_paragraph: String,
}

impl From<SimilarSentences> for SimilarSentencesResponse {
    fn from(parsed: SimilarSentences) -> Self {
        let SimilarSentences {
            basic,
            intermediate,
            advanced,
            tip,
            context_paragraph,
        } = parsed;

        Self {
            similar_sentences: [basic, intermediate, advanced],
            tip,
            context_paragraph,
        }
    }
}

/// POST /api/similar-sentences
pub async fn similar_sentences(
    State(state): State<AppState>,
    payload: Result<Json<SimilarSentencesRequest>, JsonRejection>,
) -> ApiResult<Json<SimilarSentencesResponse>> {
    let Json(request) = payload.map_err(|e| rejected(e, SENTENCE_REQUIRED))?;
    let sentence = present(request.sentence)
        .ok_or_else(|| ApiError::BadRequest(SENTENCE_REQUIRED.to_string()))?;

    let prompt = prompts::similar_sentences(&sentence);
    let completion = state.llm.generate_completion(&prompt).await.map_err(|e| {
        tracing::error!(provider = state.llm.name(), "Error generating similar sentences: {}", e);
        ApiError::Upstream(GENERATION_FAILED.to_string())
    })?;

    Ok(Json(parse_similar_sentences(&completion).into()))
}
