//! Common error types for Lingo

use thiserror::Error;

/// Common result type for Lingo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the Lingo crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Practice corpus is unusable (empty, blank entries, bad file)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Structured data could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}
