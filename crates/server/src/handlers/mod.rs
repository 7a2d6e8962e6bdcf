//! HTTP and WebSocket handlers

pub mod auth;
pub mod chat;
pub mod codes;
pub mod requests;
pub mod ws;

// Re-export AppState from config
pub use crate::config::AppState;

// PIN checks
pub use auth::{check_pin, check_premium_pin};

// Free and premium code lists
pub use codes::{add_code, delete_code, list_codes};

// Premium access requests
pub use requests::{add_request, list_requests};

// Degree 2 chat, REST and real-time
pub use chat::{list_messages, post_message};
pub use ws::chat_socket;
