//! Translation accuracy scoring
//!
//! Compares a learner's translation with the reference translation and
//! produces an integer score in `0..=100`.
//!
//! Normalization is deliberately minimal: both strings are lowercased and
//! trimmed of outer whitespace. Internal whitespace and punctuation are kept
//! and take part in the comparison.
//!
//! Similarity is Dice's coefficient over character bigrams, counted as a
//! multiset (a bigram repeated in one string can only be matched as many
//! times as it occurs in the other).

use std::collections::HashMap;

/// Highest possible score, returned for an exact match after normalization
pub const MAX_SCORE: u8 = 100;

/// Score a user's translation against the reference translation
///
/// Returns 100 immediately when the normalized strings are equal, so exact
/// matches never depend on floating-point precision. Otherwise the bigram
/// similarity is scaled to a percentage and rounded half-up.
pub fn score(user_input: &str, reference_translation: &str) -> u8 {
    let user = normalize(user_input);
    let reference = normalize(reference_translation);

    if user == reference {
        return MAX_SCORE;
    }

    to_percent(dice_coefficient(&user, &reference))
}

/// Lowercase and trim outer whitespace
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Dice's coefficient over character bigrams, in `[0.0, 1.0]`
///
/// Identical strings are 1.0. Non-identical strings where either side has
/// fewer than two characters have no bigrams to compare and are 0.0.
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len() < 2 || b_chars.len() < 2 {
        return 0.0;
    }

    let mut remaining = bigram_counts(&a_chars);
    let mut shared = 0usize;

    for pair in b_chars.windows(2) {
        if let Some(count) = remaining.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    let total = (a_chars.len() - 1) + (b_chars.len() - 1);
    (2.0 * shared as f64) / total as f64
}

fn bigram_counts(chars: &[char]) -> HashMap<(char, char), usize> {
    let mut counts = HashMap::with_capacity(chars.len());
    for pair in chars.windows(2) {
        *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

/// Scale a similarity to a 0-100 score, rounding half-up
fn to_percent(similarity: f64) -> u8 {
    let scaled = (similarity.clamp(0.0, 1.0) * 100.0 + 0.5).floor();
    scaled as u8
}
