//! REST view of the Degree 2 chat
//!
//! Posts go through the same [`ChatChannel`](crate::chat::ChatChannel) as the
//! real-time socket, so live participants see them too.

use crate::config::AppState;
use crate::error::{JsonBody, Result};
use crate::models::{Ack, ChatMessage, ChatMessageInput};
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

/// GET /api/degree2-chat
pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    info!("GET /api/degree2-chat");
    Json(state.chat.history().await)
}

/// POST /api/degree2-chat
pub async fn post_message(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ChatMessageInput>,
) -> Result<(StatusCode, Json<Ack>)> {
    info!("POST /api/degree2-chat");
    let message = input.require()?;
    let delivered = state.chat.post_message(message).await?;
    info!("Chat message stored, queued for {} live participants", delivered);
    Ok((StatusCode::CREATED, Json(Ack::ok())))
}
