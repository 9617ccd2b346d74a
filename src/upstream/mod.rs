//! Chat-completion API client abstraction.
//!
//! The generate handler talks to the model through `CompletionClient`, so the
//! live OpenAI client can be replaced by a stub in tests. A single attempt is
//! made per call; failures surface immediately.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiClient;

/// Error type for completion calls.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The API answered with a non-success status.
    #[error("OpenAI API error: {status} {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode completion response: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// A system + user message pair sent as one completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the request and return the first choice's message content, if
    /// the response carried one.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, UpstreamError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
