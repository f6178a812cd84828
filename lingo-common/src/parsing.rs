//! Parsing of generative-model completions
//!
//! The similar-sentences prompt asks the model to answer in a line-tagged
//! format:
//!
//! ```text
//! SIMILAR1: ...
//! SIMILAR2: ...
//! SIMILAR3: ...
//! TIP: ...
//! CONTEXT: ...
//! ```
//!
//! Models do not always comply, so each field is extracted on its own: the
//! first line starting with the field's tag wins, and a missing tag leaves
//! that field empty. Parsing never fails.
//!
//! Only the remainder of the tagged line is captured. A value that wraps onto
//! following lines is truncated to its first line.

use once_cell::sync::Lazy;
use regex::Regex;

/// A field of the similar-sentences completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimilarField {
    Basic,
    Intermediate,
    Advanced,
    Tip,
    Context,
}

impl SimilarField {
    /// Every field, in the order the prompt asks for them
    pub const ALL: [SimilarField; 5] = [
        SimilarField::Basic,
        SimilarField::Intermediate,
        SimilarField::Advanced,
        SimilarField::Tip,
        SimilarField::Context,
    ];

    /// Line tag the model is asked to emit for this field (without the colon)
    pub fn tag(self) -> &'static str {
        match self {
            SimilarField::Basic => "SIMILAR1",
            SimilarField::Intermediate => "SIMILAR2",
            SimilarField::Advanced => "SIMILAR3",
            SimilarField::Tip => "TIP",
            SimilarField::Context => "CONTEXT",
        }
    }
}

/// Structured result of a similar-sentences completion
///
/// Every field defaults to an empty string when its tag is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimilarSentences {
    pub basic: String,
    pub intermediate: String,
    pub advanced: String,
    pub tip: String,
    pub context_paragraph: String,
}

impl SimilarSentences {
    /// Mutable slot for a field
    fn slot_mut(&mut self, field: SimilarField) -> &mut String {
        match field {
            SimilarField::Basic => &mut self.basic,
            SimilarField::Intermediate => &mut self.intermediate,
            SimilarField::Advanced => &mut self.advanced,
            SimilarField::Tip => &mut self.tip,
            SimilarField::Context => &mut self.context_paragraph,
        }
    }

    /// Value of a field
    pub fn get(&self, field: SimilarField) -> &str {
        match field {
            SimilarField::Basic => &self.basic,
            SimilarField::Intermediate => &self.intermediate,
            SimilarField::Advanced => &self.advanced,
            SimilarField::Tip => &self.tip,
            SimilarField::Context => &self.context_paragraph,
        }
    }

    /// Fields whose tag was not found (or had an empty value)
    pub fn missing_fields(&self) -> Vec<SimilarField> {
        SimilarField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }
}

/// One pattern per field: tag at the start of a line, value up to end of line
static FIELD_PATTERNS: Lazy<Vec<(SimilarField, Regex)>> = Lazy::new(|| {
    SimilarField::ALL
        .into_iter()
        .map(|field| {
            let pattern = format!(r"(?m)^[ \t]*{}:(.*)$", regex::escape(field.tag()));
            let regex = Regex::new(&pattern).expect("valid field tag regex");
            (field, regex)
        })
        .collect()
});

/// Extract the five tagged fields from a similar-sentences completion
pub fn parse_similar_sentences(completion: &str) -> SimilarSentences {
    let mut result = SimilarSentences::default();

    for (field, regex) in FIELD_PATTERNS.iter() {
        if let Some(value) = regex
            .captures(completion)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
        {
            *result.slot_mut(*field) = value.to_string();
        }
    }

    let missing = result.missing_fields();
    if !missing.is_empty() {
        tracing::debug!(?missing, "Completion is missing tagged fields");
    }

    result
}

/// Extract the corrected text from a grammar-refinement completion
///
/// The refinement prompt asks for the corrected text only, so the whole
/// completion is the answer minus surrounding whitespace.
pub fn parse_refined_text(completion: &str) -> String {
    completion.trim().to_string()
}
