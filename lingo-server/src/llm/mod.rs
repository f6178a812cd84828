//! Generative-text provider boundary
//!
//! Handlers only see [`CompletionProvider`]: a prompt goes in, a completion
//! string comes out. The production implementation talks to Gemini; tests
//! substitute a scripted provider.

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiClient;

/// Generative model client errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("No API key configured for the generative model")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Model returned no completion text")]
    EmptyCompletion,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Anything that can turn a prompt into a completion
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider identifier used in logs (e.g. "gemini")
    fn name(&self) -> &'static str;

    /// Send `prompt` to the model and return its completion text
    ///
    /// No retries are attempted; any failure is returned to the caller.
    async fn generate_completion(&self, prompt: &str) -> Result<String, LlmError>;
}
