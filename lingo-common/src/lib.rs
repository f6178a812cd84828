//! # Lingo Common Library
//!
//! Shared code for the Lingo translation-practice service:
//! - Practice corpus (source sentence / reference translation pairs)
//! - Accuracy scoring of a user's translation
//! - Parsing of generative-model completions into structured fields
//! - Prompt templates sent to the generative model
//! - Practice policy (similar-sentence threshold)
//! - Configuration loading

pub mod config;
pub mod corpus;
pub mod error;
pub mod parsing;
pub mod policy;
pub mod prompts;
pub mod scoring;

pub use corpus::{Corpus, PracticeItem};
pub use error::{Error, Result};
pub use parsing::{parse_refined_text, parse_similar_sentences, SimilarSentences};
pub use policy::PracticePolicy;
pub use scoring::score;
