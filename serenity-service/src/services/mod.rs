pub mod chat;
pub mod database;
pub mod mock;
pub mod providers;

pub use chat::ChatGateway;
pub use database::{AffirmationStore, PgAffirmationStore};
pub use mock::MockAffirmationStore;
pub use providers::{CompletionProvider, MockCompletionProvider, ProviderError};
