//! Translation accuracy endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use lingo_common::score;
use serde::{Deserialize, Serialize};

use super::{present, rejected};
use crate::{ApiError, ApiResult, AppState};

const MISSING_FIELDS: &str = "Missing required fields";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAccuracyRequest {
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResponse {
    /// Score in 0..=100
    pub accuracy: u8,
}

/// POST /api/check-accuracy
pub async fn check_accuracy(
    State(state): State<AppState>,
    payload: Result<Json<CheckAccuracyRequest>, JsonRejection>,
) -> ApiResult<Json<AccuracyResponse>> {
    let Json(request) = payload.map_err(|e| rejected(e, MISSING_FIELDS))?;

    let (Some(user_input), Some(correct_answer)) =
        (present(request.user_input), present(request.correct_answer))
    else {
        return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
    };

    let accuracy = score(&user_input, &correct_answer);
    tracing::debug!(
        accuracy,
        passing = state.policy.is_passing(accuracy),
        "Scored translation"
    );

    Ok(Json(AccuracyResponse { accuracy }))
}
