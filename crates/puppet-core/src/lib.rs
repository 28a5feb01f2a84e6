//! Payload schemas for mock chat puppets.
//!
//! This crate provides the shared data shapes used by every mock in the
//! puppet ecosystem. It defines:
//!
//! - [`ContactPayload`] / [`RoomPayload`] - What a contact or room looks like
//! - [`MessagePayload`] / [`MessageType`] / [`Conversation`] - Message records
//! - [`FileBox`], [`MiniProgramPayload`], [`UrlLinkPayload`] - Things that can be sent
//! - [`PuppetEvent`] - Events emitted by a puppet
//!
//! All schemas serialize to camelCase JSON so fixtures can be dumped and
//! reloaded.
//!
//! # Example
//!
//! ```rust
//! use puppet_core::{Conversation, MessagePayload, MessageType};
//!
//! let message = MessagePayload::text("m1", 1_700_000_000_000, "alice", "hello", Conversation::to("bob"));
//!
//! assert_eq!(message.message_type, MessageType::Text);
//! assert_eq!(message.to_id(), Some("bob"));
//! assert_eq!(message.room_id(), None);
//! ```

mod contact;
mod event;
mod file_box;
mod link;
mod message;
mod room;

pub use contact::{ContactGender, ContactPayload, ContactType};
pub use event::{EventMessagePayload, PuppetEvent};
pub use file_box::{FileBox, OCTET_STREAM};
pub use link::{MiniProgramPayload, UrlLinkPayload};
pub use message::{Conversation, MessagePayload, MessageType};
pub use room::RoomPayload;
