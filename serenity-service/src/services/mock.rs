//! In-memory store for exercising the router without PostgreSQL.

use super::database::AffirmationStore;
use crate::models::AffirmationRecord;
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store that returns a fixed row set, or fails with a fixed message.
pub struct MockAffirmationStore {
    outcome: Result<Vec<AffirmationRecord>, String>,
    calls: AtomicUsize,
}

impl MockAffirmationStore {
    pub fn with_rows(rows: Vec<AffirmationRecord>) -> Self {
        Self {
            outcome: Ok(rows),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AffirmationStore for MockAffirmationStore {
    async fn fetch_random_affirmation(&self) -> Result<Vec<AffirmationRecord>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        match &self.outcome {
            Ok(rows) => Ok(rows.clone()),
            Err(message) => Err(AppError::DatabaseError(anyhow::anyhow!(message.clone()))),
        }
    }
}
