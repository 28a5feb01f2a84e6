//! Shared base for mock records: identity, conversation role and observers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::contact::ContactMock;
use crate::room::RoomMock;

/// Something living in the mock world that has an identity.
///
/// Message targets are taken as `&dyn Accessory` so that anything can be
/// passed; only contacts and rooms resolve to a conversation.
pub trait Accessory {
    /// Identity of the record.
    fn id(&self) -> &str;

    /// Short name of the record type, used in logs and errors.
    fn accessory_type(&self) -> &'static str;

    /// The conversation this record can receive messages in, if any.
    fn as_conversation(&self) -> Option<ConversationTarget> {
        None
    }
}

/// A contact or a room: something a message can be addressed to.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationTarget {
    Contact(ContactMock),
    Room(RoomMock),
}

impl Accessory for ConversationTarget {
    fn id(&self) -> &str {
        match self {
            Self::Contact(contact) => contact.id(),
            Self::Room(room) => room.id(),
        }
    }

    fn accessory_type(&self) -> &'static str {
        match self {
            Self::Contact(contact) => contact.accessory_type(),
            Self::Room(room) => room.accessory_type(),
        }
    }

    fn as_conversation(&self) -> Option<ConversationTarget> {
        Some(self.clone())
    }
}

type Handler<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// A list of handlers notified with a value.
///
/// Handlers may trigger further notifications. A handler that is already
/// running is skipped instead of being re-entered.
pub struct Observers<T> {
    handlers: RefCell<Vec<Handler<T>>>,
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Register a handler.
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) {
        self.handlers.borrow_mut().push(Rc::new(RefCell::new(handler)));
    }

    /// Call every registered handler with `value`, in registration order.
    pub fn notify(&self, value: &T) {
        // Snapshot so handlers can subscribe or notify while we iterate.
        let handlers: Vec<Handler<T>> = self.handlers.borrow().clone();
        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => (*handler)(value),
                Err(_) => trace!("skipping re-entrant observer"),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.len())
            .finish()
    }
}
