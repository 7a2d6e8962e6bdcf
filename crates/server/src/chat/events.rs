//! Real-time wire events
//!
//! Frames are JSON envelopes: `{"event": "<name>", "data": <payload>}`.

use crate::models::{ChatMessage, ChatMessageInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client -> server.
///
/// `loadChatHistory` ignores whatever payload it carries, and a
/// `sendChatMessage` without one is an empty message.
#[derive(Debug, Deserialize)]
#[serde(try_from = "Envelope")]
pub enum ClientEvent {
    LoadChatHistory,
    SendChatMessage(ChatMessageInput),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

impl TryFrom<Envelope> for ClientEvent {
    type Error = String;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        match envelope.event.as_str() {
            "loadChatHistory" => Ok(ClientEvent::LoadChatHistory),
            "sendChatMessage" => match envelope.data {
                Value::Null => Ok(ClientEvent::SendChatMessage(ChatMessageInput::default())),
                data => serde_json::from_value(data)
                    .map(ClientEvent::SendChatMessage)
                    .map_err(|e| format!("invalid sendChatMessage payload: {e}")),
            },
            other => Err(format!("unknown event `{other}`")),
        }
    }
}

/// Server -> client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Full history, sent only to the participant that asked
    ChatHistory(Vec<ChatMessage>),
    /// A freshly posted message, sent to everyone
    NewChatMessage(ChatMessage),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_client_events() {
        let event: ClientEvent = serde_json::from_str(r#"{"event":"loadChatHistory"}"#).unwrap();
        assert!(matches!(event, ClientEvent::LoadChatHistory));

        let event: ClientEvent = serde_json::from_str(
            r#"{"event":"sendChatMessage","data":{"name":"Hiram","text":"hello"}}"#,
        )
        .unwrap();
        match event {
            ClientEvent::SendChatMessage(input) => {
                assert_eq!(input.name.as_deref(), Some("Hiram"));
                assert_eq!(input.text.as_deref(), Some("hello"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn history_requests_ignore_their_payload() {
        for raw in [
            r#"{"event":"loadChatHistory","data":{}}"#,
            r#"{"event":"loadChatHistory","data":null}"#,
            r#"{"event":"loadChatHistory","data":[1,2]}"#,
        ] {
            let event: ClientEvent = serde_json::from_str(raw).unwrap();
            assert!(matches!(event, ClientEvent::LoadChatHistory), "{raw}");
        }
    }

    #[test]
    fn send_without_payload_is_an_empty_message() {
        let event: ClientEvent = serde_json::from_str(r#"{"event":"sendChatMessage"}"#).unwrap();
        match event {
            ClientEvent::SendChatMessage(input) => {
                assert!(input.name.is_none());
                assert!(input.text.is_none());
            }
            other => panic!("unexpected event {other:?}"),
        }

        assert!(
            serde_json::from_str::<ClientEvent>(r#"{"event":"sendChatMessage","data":"hi"}"#)
                .is_err()
        );
    }

    #[test]
    fn rejects_unknown_events() {
        assert!(serde_json::from_str::<ClientEvent>(r#"{"event":"deleteMessage"}"#).is_err());
        assert!(serde_json::from_str::<ClientEvent>("not json").is_err());
        assert!(serde_json::from_str::<ClientEvent>(r#"{"data":{}}"#).is_err());
    }

    #[test]
    fn server_events_use_envelope() {
        let message = ChatMessage {
            name: "Hiram".into(),
            text: "hello".into(),
            time: "9:00:00 AM".into(),
        };

        let value = serde_json::to_value(ServerEvent::NewChatMessage(message.clone())).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "newChatMessage",
                "data": { "name": "Hiram", "text": "hello", "time": "9:00:00 AM" }
            })
        );

        let value = serde_json::to_value(ServerEvent::ChatHistory(vec![message])).unwrap();
        assert_eq!(value["event"], "chatHistory");
        assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
    }
}
