use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::models::AffirmationsResponse;
use crate::startup::AppState;

/// `GET /affirm`: one random affirmation, wrapped in a list.
#[tracing::instrument(skip(state))]
pub async fn get_affirmations(
    State(state): State<AppState>,
) -> Result<Json<AffirmationsResponse>, AppError> {
    let affirmations = state.store.fetch_random_affirmation().await?;

    Ok(Json(AffirmationsResponse { affirmations }))
}
