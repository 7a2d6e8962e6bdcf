//! The premium chat channel: one global broadcast group, no rooms.

use super::events::ServerEvent;
use super::registry::{ParticipantId, ParticipantReceiver, ParticipantRegistry};
use crate::models::{ChatMessage, Collection};
use crate::store::JsonStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ChatChannel {
    store: Arc<JsonStore>,
    participants: ParticipantRegistry,
}

impl ChatChannel {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self {
            store,
            participants: ParticipantRegistry::new(),
        }
    }

    /// Register a new participant. Events for it arrive on the returned
    /// receiver until [`ChatChannel::disconnect`] is called.
    pub fn join(&self) -> (ParticipantId, ParticipantReceiver) {
        let (id, rx) = self.participants.register();
        info!(
            "Participant {} connected to Degree 2 chat ({} connected)",
            id,
            self.participants.len()
        );
        (id, rx)
    }

    /// Persisted messages in stored order
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.store.load(Collection::Degree2Chat).await
    }

    /// Send the full history to `participant` only.
    pub async fn request_history(&self, participant: ParticipantId) {
        let messages = self.history().await;
        let count = messages.len();
        if self
            .participants
            .send_to(participant, ServerEvent::ChatHistory(messages))
        {
            debug!("Sent {} history messages to {}", count, participant);
        } else {
            debug!("Participant {} left before history was sent", participant);
        }
    }

    /// Persist `message`, then broadcast it to every participant including
    /// the sender. Nothing is broadcast if persisting fails.
    ///
    /// Returns the number of participants the message was queued for.
    pub async fn post_message(&self, message: ChatMessage) -> Result<usize> {
        self.store
            .append(Collection::Degree2Chat, message.clone())
            .await?;

        let delivered = self
            .participants
            .broadcast(&ServerEvent::NewChatMessage(message));
        debug!("Broadcast chat message to {} participants", delivered);
        Ok(delivered)
    }

    pub fn disconnect(&self, participant: ParticipantId) {
        if self.participants.remove(participant) {
            info!(
                "Participant {} disconnected from Degree 2 chat ({} connected)",
                participant,
                self.participants.len()
            );
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
