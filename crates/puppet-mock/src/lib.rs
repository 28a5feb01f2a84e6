//! Mock contacts, rooms and messages for testing chat bot message flows.
//!
//! This crate provides a self-contained fake chat world:
//! - [`Mocker`] - Owns every record and emits puppet events
//! - [`ContactMock`] - Fake contacts, kept in one pool per [`ContactKind`],
//!   that can [`say`](ContactMock::say) things to contacts and rooms
//! - [`RoomMock`] - Fake group rooms
//! - [`MessageMock`] - Messages created through the mocker
//!
//! What is said decides the message type: text (or nothing, which produces a
//! generated sentence), a contact card, a [`FileBox`](puppet_core::FileBox)
//! classified by MIME type or extension, a mini program or a URL card.
//!
//! # Example
//!
//! ```rust
//! use puppet_mock::{Mocker, MockerConfig, PuppetEvent};
//! use puppet_core::{ContactPayload, MessageType, RoomPayload};
//!
//! let mocker = Mocker::new(MockerConfig::with_seed(7));
//! let mut events = mocker.subscribe();
//!
//! let alice = mocker.create_contact(ContactPayload::new("c1", "Alice")).unwrap();
//! let room = mocker.create_room(RoomPayload::new("r1", "Friends")).unwrap();
//!
//! let message = alice.say("hello").to(&room).unwrap();
//!
//! assert_eq!(message.message_type(), MessageType::Text);
//! assert_eq!(message.payload().room_id(), Some("r1"));
//! assert_eq!(events.try_recv().unwrap(), PuppetEvent::message(message.id()));
//! ```

mod accessory;
mod config;
mod contact;
mod error;
pub mod generator;
mod message;
mod mocker;
mod pool;
mod room;
mod sayable;

pub use accessory::{Accessory, ConversationTarget, Observers};
pub use config::{ConfigError, MockerConfig};
pub use contact::{AbstractContact, ContactKind, ContactMock, MockContact, Say};
pub use error::MockError;
pub use message::MessageMock;
pub use mocker::Mocker;
pub use pool::Pool;
pub use room::RoomMock;
pub use sayable::{classify_file, Attachment, Sayable};

// Re-export the event type for convenience
pub use puppet_core::PuppetEvent;
