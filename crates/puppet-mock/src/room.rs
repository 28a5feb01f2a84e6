//! Mock rooms.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use puppet_core::RoomPayload;
use tracing::{debug, trace};

use crate::accessory::{Accessory, ConversationTarget, Observers};
use crate::contact::ContactMock;
use crate::error::MockError;
use crate::message::MessageMock;
use crate::mocker::{Mocker, MockerState};

/// Pool name for rooms.
pub(crate) const KIND: &str = "MockRoom";

struct RoomInner {
    id: String,
    payload: RefCell<RoomPayload>,
    observers: Observers<MessageMock>,
    mocker: Weak<MockerState>,
}

/// A fake group room that contacts can talk in.
#[derive(Clone)]
pub struct RoomMock {
    inner: Rc<RoomInner>,
}

impl RoomMock {
    /// Create a room. Fails if the identity is already registered.
    pub fn create(mocker: &Mocker, payload: RoomPayload) -> Result<Self, MockError> {
        debug!("{}::create({})", KIND, payload.id);

        let room = Self {
            inner: Rc::new(RoomInner {
                id: payload.id.clone(),
                payload: RefCell::new(payload.clone()),
                observers: Observers::new(),
                mocker: mocker.downgrade(),
            }),
        };

        mocker.state.rooms.borrow_mut().insert(room.id(), room.clone())?;
        mocker.register_room_payload(payload);

        Ok(room)
    }

    /// Load an existing room.
    pub fn load(mocker: &Mocker, id: &str) -> Result<Self, MockError> {
        mocker.state.rooms.borrow().load(id)
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn payload(&self) -> RoomPayload {
        self.inner.payload.borrow().clone()
    }

    pub fn topic(&self) -> String {
        self.inner.payload.borrow().topic.clone()
    }

    pub fn member_ids(&self) -> Vec<String> {
        self.inner.payload.borrow().member_id_list.clone()
    }

    pub fn has_member(&self, contact: &ContactMock) -> bool {
        self.inner.payload.borrow().has_member(contact.id())
    }

    /// Resolve the member list to contacts. Members that are not registered
    /// with the mocker are skipped.
    pub fn members(&self) -> Result<Vec<ContactMock>, MockError> {
        let mocker = Mocker::upgrade(&self.inner.mocker)?;
        Ok(self
            .member_ids()
            .iter()
            .filter_map(|id| mocker.find_contact(id))
            .collect())
    }

    /// Register a handler called with every message sent to this room.
    pub fn on_message(&self, handler: impl FnMut(&MessageMock) + 'static) -> &Self {
        self.inner.observers.subscribe(handler);
        self
    }

    pub(crate) fn notify_message(&self, message: &MessageMock) {
        trace!("{} {} received message {}", KIND, self.id(), message.id());
        self.inner.observers.notify(message);
    }
}

impl Accessory for RoomMock {
    fn id(&self) -> &str {
        &self.inner.id
    }

    fn accessory_type(&self) -> &'static str {
        "room"
    }

    fn as_conversation(&self) -> Option<ConversationTarget> {
        Some(ConversationTarget::Room(self.clone()))
    }
}

impl PartialEq for RoomMock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for RoomMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomMock")
            .field("id", &self.inner.id)
            .field("topic", &self.inner.payload.borrow().topic)
            .finish()
    }
}
