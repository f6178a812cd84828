//! Practice corpus
//!
//! A fixed list of source-language sentences paired with their reference
//! translations. The corpus is loaded once at startup and shared read-only
//! by every request.
//!
//! A corpus is never empty: construction rejects an empty list, so drawing a
//! random item cannot fail at request time.

use crate::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Corpus compiled into the binary, used when no corpus file is configured
const BUILTIN_CORPUS: &str = include_str!("../data/sentences.json");

/// One sentence to translate and its reference translation
///
/// On disk the fields may also be named `marathi` / `english`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeItem {
    /// Sentence shown to the learner
    #[serde(alias = "marathi")]
    pub source: String,
    /// Expected translation
    #[serde(alias = "english")]
    pub reference: String,
}

impl PracticeItem {
    pub fn new(source: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            reference: reference.into(),
        }
    }
}

/// Immutable, non-empty set of practice items
#[derive(Debug, Clone)]
pub struct Corpus {
    items: Vec<PracticeItem>,
}

impl Corpus {
    /// Build a corpus, rejecting an empty list and blank entries
    pub fn new(items: Vec<PracticeItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::Corpus("corpus contains no practice items".to_string()));
        }

        if let Some(index) = items
            .iter()
            .position(|item| item.source.trim().is_empty() || item.reference.trim().is_empty())
        {
            return Err(Error::Corpus(format!(
                "practice item {} has a blank source or reference",
                index
            )));
        }

        Ok(Self { items })
    }

    /// Parse a JSON array of practice items
    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<PracticeItem> = serde_json::from_str(json)
            .map_err(|e| Error::Parse(format!("invalid corpus JSON: {}", e)))?;
        Self::new(items)
    }

    /// Load a corpus from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Corpus(format!("failed to read {}: {}", path.display(), e))
        })?;
        let corpus = Self::from_json_str(&content)?;
        info!(
            "Loaded {} practice items from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Corpus compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CORPUS)
    }

    /// Load from `path` when given, otherwise use the built-in corpus
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let corpus = Self::builtin()?;
                info!("Using built-in corpus ({} practice items)", corpus.len());
                Ok(corpus)
            }
        }
    }

    /// Pick one item uniformly at random
    pub fn random_item<R: Rng + ?Sized>(&self, rng: &mut R) -> &PracticeItem {
        &self.items[rng.gen_range(0..self.items.len())]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_corpus_loads() {
        let corpus = Corpus::builtin().unwrap();
        assert!(!corpus.is_empty());
        assert!(corpus
            .items
            .iter()
            .all(|item| !item.source.is_empty() && !item.reference.is_empty()));
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let err = Corpus::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Corpus(_)));

        let err = Corpus::from_json_str("[]").unwrap_err();
        assert!(matches!(err, Error::Corpus(_)));
    }

    #[test]
    fn test_blank_item_rejected() {
        let err = Corpus::new(vec![
            PracticeItem::new("नमस्कार", "Hello"),
            PracticeItem::new("  ", "Blank source"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("practice item 1"));
    }

    #[test]
    fn test_original_field_names_accepted() {
        let corpus =
            Corpus::from_json_str(r#"[{"marathi": "मी जातो.", "english": "I go."}]"#).unwrap();
        assert_eq!(corpus.items[0], PracticeItem::new("मी जातो.", "I go."));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Corpus::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_corpus_error() {
        let err = Corpus::load(Path::new("/nonexistent/lingo/sentences.json")).unwrap_err();
        assert!(matches!(err, Error::Corpus(_)));
    }

    #[test]
    fn test_random_item_single_entry() {
        let corpus = Corpus::new(vec![PracticeItem::new("एक", "One")]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(corpus.random_item(&mut rng).reference, "One");
        }
    }

    #[test]
    fn test_random_item_covers_corpus() {
        let corpus = Corpus::new(vec![
            PracticeItem::new("एक", "One"),
            PracticeItem::new("दोन", "Two"),
            PracticeItem::new("तीन", "Three"),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<&str> = (0..200)
            .map(|_| corpus.random_item(&mut rng).reference.as_str())
            .collect();
        assert_eq!(seen.len(), 3);
    }
}
