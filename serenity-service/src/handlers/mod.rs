//! HTTP handlers for serenity-service.

pub mod affirm;
pub mod chat;
pub mod health;

pub use affirm::get_affirmations;
pub use chat::chat;
pub use health::{health_check, metrics};
