//! Chat completion provider abstraction.
//!
//! The router only depends on [`CompletionProvider`], so the Azure backend
//! can be swapped for the mock in tests.

pub mod azure_openai;
pub mod mock;

use crate::models::ChatMessage;
use async_trait::async_trait;
use thiserror::Error;

pub use azure_openai::AzureOpenAiProvider;
pub use mock::MockCompletionProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Azure OpenAI API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One candidate answer from the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionChoice {
    pub content: Option<String>,
    pub finish_reason: Option<String>,
}

/// Result of a chat completion call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

/// Trait for remote chat completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit a conversation and return the model's choices.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResponse, ProviderError>;
}
