//! Degree 2 real-time chat
//!
//! Participants join, optionally ask for history, then exchange messages
//! that are persisted before they are fanned out.

pub mod channel;
pub mod events;
pub mod registry;

pub use channel::ChatChannel;
pub use events::{ClientEvent, ServerEvent};
pub use registry::{ParticipantId, ParticipantReceiver, ParticipantRegistry};
