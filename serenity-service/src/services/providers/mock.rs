//! Mock provider implementation for testing.

use super::{CompletionChoice, CompletionProvider, CompletionResponse, ProviderError};
use crate::models::{ChatMessage, Role};
use async_trait::async_trait;
use std::sync::Mutex;

enum Behavior {
    Echo,
    Reply(String),
    NoChoices,
    Fail(String),
}

/// Mock completion provider that records every conversation it receives.
pub struct MockCompletionProvider {
    behavior: Behavior,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockCompletionProvider {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers `Mock response for: <user message>`.
    pub fn echo() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reply(text.into()))
    }

    /// Succeeds with zero choices.
    pub fn no_choices() -> Self {
        Self::with_behavior(Behavior::NoChoices)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// Conversations received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

fn choice(content: String) -> CompletionResponse {
    CompletionResponse {
        choices: vec![CompletionChoice {
            content: Some(content),
            finish_reason: Some("stop".to_string()),
        }],
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }

        // Yield so concurrent callers interleave.
        tokio::task::yield_now().await;

        match &self.behavior {
            Behavior::Echo => {
                let user = messages
                    .iter()
                    .rev()
                    .find(|m| m.role == Role::User)
                    .map(|m| m.content.as_str())
                    .unwrap_or_default();
                Ok(choice(format!("Mock response for: {}", user)))
            }
            Behavior::Reply(text) => Ok(choice(text.clone())),
            Behavior::NoChoices => Ok(CompletionResponse::default()),
            Behavior::Fail(message) => Err(ProviderError::Network(message.clone())),
        }
    }
}
