//! What a mock contact can say, and how it maps to a message type.

use puppet_core::{FileBox, MessageType, MiniProgramPayload, UrlLinkPayload};

use crate::contact::ContactMock;

/// Content passed to [`ContactMock::say`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Sayable {
    /// Nothing in particular: a random sentence is generated.
    #[default]
    Nothing,
    /// Plain text. Empty text is treated like [`Sayable::Nothing`].
    Text(String),
    /// A contact card.
    Contact(ContactMock),
    /// A file.
    File(FileBox),
    /// A mini program card.
    MiniProgram(MiniProgramPayload),
    /// A URL card.
    Url(UrlLinkPayload),
}

/// Non-text content stored alongside a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Contact(ContactMock),
    File(FileBox),
    MiniProgram(MiniProgramPayload),
    Url(UrlLinkPayload),
}

impl Sayable {
    /// Message type this content is sent as.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Contact(_) => MessageType::Contact,
            Self::File(file) => classify_file(file),
            Self::MiniProgram(_) => MessageType::MiniProgram,
            Self::Url(_) => MessageType::Url,
            Self::Text(_) | Self::Nothing => MessageType::Text,
        }
    }

    /// The text to send, if any was supplied.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    /// Split off the attachment part of the content.
    pub fn into_attachment(self) -> Option<Attachment> {
        match self {
            Self::Contact(contact) => Some(Attachment::Contact(contact)),
            Self::File(file) => Some(Attachment::File(file)),
            Self::MiniProgram(mini_program) => Some(Attachment::MiniProgram(mini_program)),
            Self::Url(url) => Some(Attachment::Url(url)),
            Self::Text(_) | Self::Nothing => None,
        }
    }
}

/// Message type of a file, from its MIME type or, when that is missing or
/// generic, from its extension.
pub fn classify_file(file: &FileBox) -> MessageType {
    let key = match file.specific_mime_type() {
        Some(mime) => mime.to_ascii_lowercase(),
        None => file.extension().unwrap_or_default(),
    };

    match key.as_str() {
        "image/jpeg" | "image/png" | ".jpg" | ".jpeg" | ".png" => MessageType::Image,
        // mp4 is reported as Audio, not Video.
        "video/mp4" | ".mp4" => MessageType::Audio,
        _ => MessageType::Unknown,
    }
}

impl From<&str> for Sayable {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Sayable {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Option<String>> for Sayable {
    fn from(text: Option<String>) -> Self {
        text.map(Self::Text).unwrap_or_default()
    }
}

impl From<ContactMock> for Sayable {
    fn from(contact: ContactMock) -> Self {
        Self::Contact(contact)
    }
}

impl From<&ContactMock> for Sayable {
    fn from(contact: &ContactMock) -> Self {
        Self::Contact(contact.clone())
    }
}

impl From<FileBox> for Sayable {
    fn from(file: FileBox) -> Self {
        Self::File(file)
    }
}

impl From<MiniProgramPayload> for Sayable {
    fn from(mini_program: MiniProgramPayload) -> Self {
        Self::MiniProgram(mini_program)
    }
}

impl From<UrlLinkPayload> for Sayable {
    fn from(url: UrlLinkPayload) -> Self {
        Self::Url(url)
    }
}
