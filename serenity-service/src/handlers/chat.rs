use axum::{body::Bytes, extract::State, Json};
use service_core::error::AppError;

use crate::models::{ChatRequest, ChatResponse};
use crate::startup::AppState;

/// `POST /chat`: forward the message to the completion gateway.
///
/// The body is parsed by hand so that a missing body, a wrong content type
/// and malformed JSON all produce the same 400 response.
#[tracing::instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let message = ChatRequest::message_from_body(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected chat request");
        e
    })?;

    let response = state
        .chat
        .get_chat_response(&message)
        .await
        .map_err(|e| AppError::UpstreamError(e.to_string()))?;

    tracing::info!(response_len = response.len(), "Chat response sent");

    Ok(Json(ChatResponse { response }))
}
