//! Registry of connected real-time participants

use super::events::ServerEvent;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;
use uuid::Uuid;

/// Outbound events a participant may have pending before new ones are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

pub type ParticipantSender = mpsc::Sender<ServerEvent>;
pub type ParticipantReceiver = mpsc::Receiver<ServerEvent>;

/// Identifies one open connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of bounded outbound queues, one per participant.
///
/// A participant whose queue is full misses the event; nobody else waits on
/// it. The lock is only held to insert, remove or iterate; never across an
/// await.
pub struct ParticipantRegistry {
    participants: RwLock<HashMap<ParticipantId, ParticipantSender>>,
    capacity: usize,
}

impl Default for ParticipantRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            participants: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn register(&self) -> (ParticipantId, ParticipantReceiver) {
        let id = ParticipantId::new();
        let (tx, rx) = mpsc::channel(self.capacity);
        self.participants.write().insert(id, tx);
        (id, rx)
    }

    /// Returns whether the participant was registered.
    pub fn remove(&self, id: ParticipantId) -> bool {
        self.participants.write().remove(&id).is_some()
    }

    /// Send to a single participant. Returns `false` if it is unknown, its
    /// connection is already gone or its queue is full.
    pub fn send_to(&self, id: ParticipantId, event: ServerEvent) -> bool {
        match self.participants.read().get(&id) {
            Some(tx) => offer(id, tx, event),
            None => false,
        }
    }

    /// Best-effort delivery to every participant. Closed handles and full
    /// queues are skipped. Returns how many queues accepted the event.
    pub fn broadcast(&self, event: &ServerEvent) -> usize {
        self.participants
            .read()
            .iter()
            .filter(|(id, tx)| offer(**id, tx, event.clone()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.participants.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.read().is_empty()
    }
}

fn offer(id: ParticipantId, tx: &ParticipantSender, event: ServerEvent) -> bool {
    match tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            debug!("Participant {} is lagging, dropping event", id);
            false
        }
        Err(TrySendError::Closed(_)) => false,
    }
}
