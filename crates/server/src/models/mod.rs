use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Error, Result};

/// Name used for chat messages posted without one.
pub const ANONYMOUS: &str = "Anonymous";

/// Time-of-day stamp for chat messages, e.g. `3:07:42 PM`.
const CHAT_TIME_FORMAT: &str = "%-I:%M:%S %p";
/// Date and time stamp for access requests, e.g. `10/18/2026, 3:07:42 PM`.
const REQUEST_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A named, file-backed JSON array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Free tier codes
    Codes,
    /// Premium tier codes
    Degree2Codes,
    /// Premium access requests (phone numbers)
    Degree2Requests,
    /// Premium chat log
    Degree2Chat,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Codes,
        Collection::Degree2Codes,
        Collection::Degree2Requests,
        Collection::Degree2Chat,
    ];

    /// Route segment under `/api/`
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Codes => "codes",
            Collection::Degree2Codes => "degree2-codes",
            Collection::Degree2Requests => "degree2-requests",
            Collection::Degree2Chat => "degree2-chat",
        }
    }

    /// File name inside the data directory.
    ///
    /// Free tier codes keep their historical `credits.json` name so existing
    /// deployments pick up their data unchanged.
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Codes => "credits.json",
            Collection::Degree2Codes => "degree2-codes.json",
            Collection::Degree2Requests => "degree2-requests.json",
            Collection::Degree2Chat => "degree2-chat.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An opaque code token
pub type CodeEntry = String;

/// A request for premium access, stamped on receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    pub number: String,
    pub time: String,
}

impl AccessRequest {
    pub fn stamped(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            time: Local::now().format(REQUEST_TIME_FORMAT).to_string(),
        }
    }
}

/// A single premium chat message.
///
/// Reading is lenient because older clients stored whatever they sent:
/// null or empty names read as [`ANONYMOUS`], scalar `text`/`time` values
/// are stringified and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default = "anonymous", deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: String,
}

impl ChatMessage {
    /// Build a message the way every ingress does: absent or empty names
    /// become [`ANONYMOUS`] and the time is stamped by the server.
    pub fn compose(name: Option<String>, text: impl Into<String>) -> Self {
        Self {
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(anonymous),
            text: text.into(),
            time: Local::now().format(CHAT_TIME_FORMAT).to_string(),
        }
    }
}

fn anonymous() -> String {
    ANONYMOUS.to_string()
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let name = lenient_text(deserializer)?;
    Ok(if name.is_empty() { anonymous() } else { name })
}

/// `{ "success": bool }` acknowledgement body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Treat an absent or empty field as missing.
fn required(value: Option<String>, field: &'static str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::Validation(field))
}

/// Body of `POST /check-pin` and `POST /check-premium-pin`
#[derive(Debug, Default, Deserialize)]
pub struct PinInput {
    pub pin: Option<String>,
}

/// Body of `POST /api/codes` and `POST /api/degree2-codes`
#[derive(Debug, Default, Deserialize)]
pub struct CodeInput {
    pub code: Option<String>,
}

impl CodeInput {
    pub fn require(self) -> Result<CodeEntry> {
        required(self.code, "code")
    }
}

/// Body of `POST /api/degree2-requests`
#[derive(Debug, Default, Deserialize)]
pub struct AccessRequestInput {
    pub number: Option<String>,
}

impl AccessRequestInput {
    pub fn require(self) -> Result<String> {
        required(self.number, "number")
    }
}

/// Body of `POST /api/degree2-chat` and payload of `sendChatMessage`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessageInput {
    pub name: Option<String>,
    pub text: Option<String>,
}

impl ChatMessageInput {
    /// Validate for the REST ingress, where `text` is mandatory.
    pub fn require(self) -> Result<ChatMessage> {
        let text = required(self.text, "text")?;
        Ok(ChatMessage::compose(self.name, text))
    }

    /// Compose without validation, as the real-time channel does.
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::compose(self.name, self.text.unwrap_or_default())
    }
}
