use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

/// Persona instruction sent as the first turn of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a compassionate assistant providing guidance and support for someone struggling with feelings of worthlessness and mental health challenges.";

/// Returned as the chat text when the model produced no choices.
pub const NO_RESPONSE: &str = "No response received.";

pub const NO_MESSAGE_PROVIDED: &str = "No message provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The two-turn conversation submitted for a single user message.
pub fn conversation(message: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)]
}

/// Body of `POST /chat`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub message: Option<String>,
}

impl ChatRequest {
    /// Extract the message from a raw request body.
    ///
    /// An empty body, malformed JSON, a non-object payload, or a missing,
    /// non-string or empty `message` all yield the same 400 error.
    pub fn message_from_body(body: &[u8]) -> Result<String, AppError> {
        let rejected = || AppError::BadRequest(NO_MESSAGE_PROVIDED.to_string());

        let request: ChatRequest = serde_json::from_slice(body).map_err(|_| rejected())?;
        request.validate().map_err(|_| rejected())?;
        request.message.ok_or_else(rejected)
    }
}

/// Body of a successful `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}
