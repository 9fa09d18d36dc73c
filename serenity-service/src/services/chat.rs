use super::providers::{CompletionProvider, ProviderError};
use crate::models::{conversation, NO_RESPONSE};
use std::sync::Arc;
use tracing::instrument;

/// Completion gateway: turns a user message into the model's reply.
#[derive(Clone)]
pub struct ChatGateway {
    provider: Arc<dyn CompletionProvider>,
}

impl ChatGateway {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Ask the model about `message` and return the first choice's text.
    ///
    /// Zero choices, or a first choice without content, yields
    /// [`NO_RESPONSE`] rather than an error.
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn get_chat_response(&self, message: &str) -> Result<String, ProviderError> {
        let turns = conversation(message);

        let response = self.provider.complete(&turns).await.map_err(|e| {
            tracing::error!(error = %e, "Chat completion failed");
            e
        })?;

        let first = response.choices.into_iter().next();
        if let Some(reason) = first.as_ref().and_then(|c| c.finish_reason.as_deref()) {
            tracing::debug!(finish_reason = reason, "Chat completion finished");
        }

        Ok(first
            .and_then(|choice| choice.content)
            .unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}
