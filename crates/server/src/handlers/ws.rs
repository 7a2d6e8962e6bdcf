//! WebSocket ingress for the Degree 2 chat.
//!
//! Each socket becomes one participant of the [`ChatChannel`]. A single task
//! multiplexes outbound channel events and inbound client frames with
//! `tokio::select!`. Malformed frames are logged and ignored; closing the
//! socket removes the participant.

use crate::chat::{ChatChannel, ClientEvent, ParticipantId};
use crate::config::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// GET /ws/degree2-chat
pub async fn chat_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.chat))
}

async fn handle_socket(socket: WebSocket, chat: Arc<ChatChannel>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (participant, mut events) = chat.join();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match serde_json::to_string(&event) {
                    Ok(json) => {
                        if ws_sender.send(Message::Text(json.into())).await.is_err() {
                            // Client disconnected
                            break;
                        }
                    }
                    Err(err) => warn!("Failed to serialize chat event: {err}"),
                }
            }

            frame = ws_receiver.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_event(&chat, participant, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        debug!("WebSocket receive error from {participant}: {err}");
                        break;
                    }
                    // Binary, ping and pong frames
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    chat.disconnect(participant);
}

async fn handle_client_event(chat: &ChatChannel, participant: ParticipantId, text: &str) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(err) => {
            warn!("Ignoring malformed chat frame {:?}: {}", text, err);
            return;
        }
    };

    match event {
        ClientEvent::LoadChatHistory => chat.request_history(participant).await,
        ClientEvent::SendChatMessage(input) => {
            if let Err(err) = chat.post_message(input.into_message()).await {
                error!("Failed to store chat message from {participant}: {err:#}");
            }
        }
    }
}
