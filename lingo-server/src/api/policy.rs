//! Practice policy endpoint

use axum::{extract::State, Json};
use lingo_common::PracticePolicy;

use crate::AppState;

/// GET /api/practice-policy
///
/// Lets the client read the similar-sentence threshold instead of
/// hard-coding it.
pub async fn get_practice_policy(State(state): State<AppState>) -> Json<PracticePolicy> {
    Json(state.policy)
}
