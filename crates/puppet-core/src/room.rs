//! Room schema.

use serde::{Deserialize, Serialize};

/// Raw payload describing a group room.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    /// Room identity.
    pub id: String,

    /// Room topic (group name).
    #[serde(default)]
    pub topic: String,

    #[serde(default)]
    pub avatar: Option<String>,

    /// Identities of the room members.
    #[serde(default)]
    pub member_id_list: Vec<String>,

    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub admin_id_list: Vec<String>,
}

impl RoomPayload {
    /// Create a room payload with the given id and topic and no members.
    pub fn new(id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// Set the member list.
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_id_list = members.into_iter().map(Into::into).collect();
        self
    }

    /// Set the owner.
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Check whether a contact is a member of this room.
    pub fn has_member(&self, contact_id: &str) -> bool {
        self.member_id_list.iter().any(|id| id == contact_id)
    }
}
