//! Events emitted by a puppet.

use serde::{Deserialize, Serialize};

/// Payload of a `message` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessagePayload {
    /// Identity of the message that was received.
    pub message_id: String,
}

/// An event emitted by a puppet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
#[non_exhaustive]
pub enum PuppetEvent {
    /// A new message was received.
    Message(EventMessagePayload),
}

impl PuppetEvent {
    /// Build a `message` event.
    pub fn message(message_id: impl Into<String>) -> Self {
        Self::Message(EventMessagePayload {
            message_id: message_id.into(),
        })
    }

    /// Name of the event, as used by listeners.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
        }
    }
}
