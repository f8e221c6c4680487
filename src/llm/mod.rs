//! Chat-completion client abstraction.

pub mod openai;

use futures::future::BoxFuture;
use reqwest::StatusCode;
use thiserror::Error;

pub use openai::OpenAiClient;

/// Failure of a single completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion endpoint answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

/// Turns a rendered prompt into free text.
///
/// One call per invocation; implementations must not retry or cache.
pub trait CompletionClient: Send + Sync {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, CompletionError>>;
}

/// Reject prompts that would only burn a billed call.
pub fn ensure_prompt(prompt: &str) -> Result<(), CompletionError> {
    if prompt.trim().is_empty() {
        Err(CompletionError::EmptyPrompt)
    } else {
        Ok(())
    }
}
