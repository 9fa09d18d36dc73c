pub mod affirmation;
pub mod chat;

pub use affirmation::{AffirmationRecord, AffirmationsResponse};
pub use chat::{
    conversation, ChatMessage, ChatRequest, ChatResponse, Role, NO_MESSAGE_PROVIDED,
    NO_RESPONSE, SYSTEM_PROMPT,
};
