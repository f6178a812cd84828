//! Grammar refinement endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use lingo_common::{parse_refined_text, prompts};
use serde::{Deserialize, Serialize};

use super::{present, rejected};
use crate::{ApiError, ApiResult, AppState};

const TEXT_REQUIRED: &str = "Text is required";
const REFINE_FAILED: &str = "Failed to refine text";

#[derive(Debug, Deserialize)]
pub struct RefineGrammarRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineGrammarResponse {
    pub success: bool,
    pub refined_text: String,
}

/// POST /api/refine-grammar
///
/// Returns the model's corrected, simplified version of `text`.
pub async fn refine_grammar(
    State(state): State<AppState>,
    payload: Result<Json<RefineGrammarRequest>, JsonRejection>,
) -> ApiResult<Json<RefineGrammarResponse>> {
    let Json(request) = payload.map_err(|e| rejected(e, TEXT_REQUIRED))?;
    let text =
        present(request.text).ok_or_else(|| ApiError::BadRequest(TEXT_REQUIRED.to_string()))?;

    let prompt = prompts::refine_grammar(&text);
    let completion = state.llm.generate_completion(&prompt).await.map_err(|e| {
        tracing::error!(provider = state.llm.name(), "Grammar refinement error: {}", e);
        ApiError::Failed(REFINE_FAILED.to_string())
    })?;

    Ok(Json(RefineGrammarResponse {
        success: true,
        refined_text: parse_refined_text(&completion),
    }))
}
