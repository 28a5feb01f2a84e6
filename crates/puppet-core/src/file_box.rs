//! In-memory file attachment.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Generic MIME type that carries no information about the content.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A named file held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBox {
    /// File name, including extension.
    pub name: String,

    /// Declared MIME type, if known.
    #[serde(default)]
    pub mime_type: Option<String>,

    /// File content.
    #[serde(default)]
    pub content: Vec<u8>,
}

impl FileBox {
    /// Create a file from raw bytes with no declared MIME type.
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            content: content.into(),
        }
    }

    /// Set the declared MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// The declared MIME type, unless it is missing or generic.
    pub fn specific_mime_type(&self) -> Option<&str> {
        self.mime_type
            .as_deref()
            .filter(|mime| !mime.is_empty() && *mime != OCTET_STREAM)
    }

    /// Lowercased extension of the file name including the leading dot
    /// (e.g. `".png"`), or `None` if the name has no extension.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
