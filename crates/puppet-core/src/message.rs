//! Message schema.

use serde::{Deserialize, Serialize};

/// Kind of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    #[default]
    Unknown,
    Attachment,
    Audio,
    Contact,
    ChatHistory,
    Emoticon,
    Image,
    Text,
    Location,
    MiniProgram,
    GroupNote,
    Transfer,
    RedEnvelope,
    Recalled,
    Url,
    Video,
}

/// Where a message is addressed.
///
/// A message goes either to a single contact or to a room, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Conversation {
    /// A group message, with the contacts it mentions.
    Room {
        #[serde(rename = "roomId")]
        room_id: String,
        #[serde(rename = "mentionIdList", default)]
        mention_id_list: Vec<String>,
    },
    /// A direct message to one contact.
    To {
        #[serde(rename = "toId")]
        to_id: String,
    },
}

impl Conversation {
    /// Address a direct message.
    pub fn to(to_id: impl Into<String>) -> Self {
        Self::To { to_id: to_id.into() }
    }

    /// Address a room message.
    pub fn room(room_id: impl Into<String>, mention_id_list: Vec<String>) -> Self {
        Self::Room {
            room_id: room_id.into(),
            mention_id_list,
        }
    }

    /// Identity of the contact or room this conversation points at.
    pub fn id(&self) -> &str {
        match self {
            Self::To { to_id } => to_id,
            Self::Room { room_id, .. } => room_id,
        }
    }

    /// Whether this is a room conversation.
    pub fn is_room(&self) -> bool {
        matches!(self, Self::Room { .. })
    }
}

/// Raw payload describing a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    /// Message identity.
    pub id: String,

    /// Creation time (milliseconds since epoch).
    pub timestamp: u64,

    #[serde(rename = "type")]
    pub message_type: MessageType,

    /// Text content, set for text messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// File name, set for file messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Identity of the contact that sent the message.
    pub from_id: String,

    #[serde(flatten)]
    pub conversation: Conversation,
}

impl MessagePayload {
    /// Create a payload with no text.
    pub fn new(
        id: impl Into<String>,
        timestamp: u64,
        message_type: MessageType,
        from_id: impl Into<String>,
        conversation: Conversation,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            message_type,
            text: None,
            filename: None,
            from_id: from_id.into(),
            conversation,
        }
    }

    /// Create a text message payload.
    pub fn text(
        id: impl Into<String>,
        timestamp: u64,
        from_id: impl Into<String>,
        text: impl Into<String>,
        conversation: Conversation,
    ) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(id, timestamp, MessageType::Text, from_id, conversation)
        }
    }

    /// Recipient of a direct message.
    pub fn to_id(&self) -> Option<&str> {
        match &self.conversation {
            Conversation::To { to_id } => Some(to_id.as_str()),
            Conversation::Room { .. } => None,
        }
    }

    /// Room of a group message.
    pub fn room_id(&self) -> Option<&str> {
        match &self.conversation {
            Conversation::Room { room_id, .. } => Some(room_id.as_str()),
            Conversation::To { .. } => None,
        }
    }

    /// Mentioned contacts of a group message.
    pub fn mention_id_list(&self) -> Option<&[String]> {
        match &self.conversation {
            Conversation::Room { mention_id_list, .. } => Some(mention_id_list.as_slice()),
            Conversation::To { .. } => None,
        }
    }
}
