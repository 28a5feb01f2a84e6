//! Contact schema.

use serde::{Deserialize, Serialize};

/// Gender reported for a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactGender {
    #[default]
    Unknown,
    Male,
    Female,
}

/// What kind of account a contact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactType {
    #[default]
    Unknown,
    Individual,
    Official,
    Corporation,
}

/// Raw payload describing a contact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    /// Contact identity, unique within a pool.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Alias set by the bot user.
    #[serde(default)]
    pub alias: Option<String>,

    /// Avatar URL.
    #[serde(default)]
    pub avatar: String,

    #[serde(default)]
    pub gender: ContactGender,

    #[serde(default, rename = "type")]
    pub contact_type: ContactType,

    /// Whether the contact is a friend of the bot user.
    #[serde(default)]
    pub friend: Option<bool>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub province: Option<String>,

    #[serde(default)]
    pub signature: Option<String>,

    /// Account handle, if the contact exposes one.
    #[serde(default)]
    pub weixin: Option<String>,

    /// Phone numbers.
    #[serde(default)]
    pub phone: Vec<String>,
}

impl ContactPayload {
    /// Create an individual contact payload with the given id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact_type: ContactType::Individual,
            ..Default::default()
        }
    }

    /// Set the alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the gender.
    pub fn with_gender(mut self, gender: ContactGender) -> Self {
        self.gender = gender;
        self
    }

    /// Mark the contact as a friend (or not).
    pub fn with_friend(mut self, friend: bool) -> Self {
        self.friend = Some(friend);
        self
    }
}
