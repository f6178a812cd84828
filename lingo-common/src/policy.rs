//! Practice policy
//!
//! Decides, from an accuracy score, whether a learner should be offered
//! similar sentences to study. The threshold is configuration, not a constant.

use serde::{Deserialize, Serialize};

/// Default score at or above which a translation counts as passing
pub const DEFAULT_SIMILAR_THRESHOLD: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticePolicy {
    /// Scores below this value trigger a similar-sentences request
    pub similar_threshold: u8,
}

impl Default for PracticePolicy {
    fn default() -> Self {
        Self {
            similar_threshold: DEFAULT_SIMILAR_THRESHOLD,
        }
    }
}

impl PracticePolicy {
    pub fn new(similar_threshold: u8) -> Self {
        Self { similar_threshold }
    }

    /// True when the learner should be shown similar sentences
    pub fn needs_similar_sentences(&self, score: u8) -> bool {
        score < self.similar_threshold
    }

    pub fn is_passing(&self, score: u8) -> bool {
        !self.needs_similar_sentences(score)
    }
}
