//! Structured link payloads: mini programs and URL cards.

use serde::{Deserialize, Serialize};

/// A mini program card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniProgramPayload {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub page_path: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub share_id: Option<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub thumb_key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Account that owns the mini program.
    #[serde(default)]
    pub username: Option<String>,
}

impl MiniProgramPayload {
    /// Create a mini program card with an app id and title.
    pub fn new(app_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// A rich URL card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlLinkPayload {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl UrlLinkPayload {
    /// Create a URL card.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: None,
            thumbnail_url: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
