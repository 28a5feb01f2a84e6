//! Mock messages and the attachment store.

use std::fmt;
use std::rc::{Rc, Weak};

use puppet_core::{Conversation, MessagePayload, MessageType};
use tracing::debug;

use crate::accessory::Accessory;
use crate::contact::ContactMock;
use crate::error::MockError;
use crate::mocker::{Mocker, MockerState};
use crate::room::RoomMock;
use crate::sayable::Attachment;

/// Pool name for messages.
pub(crate) const KIND: &str = "MockMessage";

struct MessageInner {
    payload: MessagePayload,
    /// The contact that composed this message. `None` for bot-side messages.
    talker: Option<ContactMock>,
    mocker: Weak<MockerState>,
}

/// A message registered with a [`Mocker`].
///
/// Messages are immutable once created.
#[derive(Clone)]
pub struct MessageMock {
    inner: Rc<MessageInner>,
}

impl MessageMock {
    /// Register a message. Fails if its id is already taken.
    ///
    /// This only stores the message; use [`Mocker::send_message`] to also
    /// announce it.
    pub fn create(mocker: &Mocker, payload: MessagePayload) -> Result<Self, MockError> {
        Self::register(mocker, payload, None)
    }

    pub(crate) fn register(
        mocker: &Mocker,
        payload: MessagePayload,
        talker: Option<ContactMock>,
    ) -> Result<Self, MockError> {
        debug!("{}::create({}, {:?})", KIND, payload.id, payload.message_type);

        let message = Self {
            inner: Rc::new(MessageInner {
                payload,
                talker,
                mocker: mocker.downgrade(),
            }),
        };
        mocker
            .state
            .messages
            .borrow_mut()
            .insert(message.id(), message.clone())?;

        Ok(message)
    }

    /// Load an existing message.
    pub fn load(mocker: &Mocker, id: &str) -> Result<Self, MockError> {
        mocker.state.messages.borrow().load(id)
    }

    /// Store the attachment carried by a message.
    pub fn set_attachment(mocker: &Mocker, message_id: &str, attachment: Attachment) {
        debug!("{}::set_attachment({})", KIND, message_id);
        mocker
            .state
            .attachments
            .borrow_mut()
            .insert(message_id.to_string(), attachment);
    }

    pub fn id(&self) -> &str {
        &self.inner.payload.id
    }

    pub fn payload(&self) -> &MessagePayload {
        &self.inner.payload
    }

    pub fn message_type(&self) -> MessageType {
        self.inner.payload.message_type
    }

    pub fn text(&self) -> Option<&str> {
        self.inner.payload.text.as_deref()
    }

    pub fn timestamp(&self) -> u64 {
        self.inner.payload.timestamp
    }

    /// Identity of the sender.
    pub fn talker_id(&self) -> &str {
        &self.inner.payload.from_id
    }

    pub fn conversation(&self) -> &Conversation {
        &self.inner.payload.conversation
    }

    /// The attachment stored for this message, if any.
    pub fn attachment(&self) -> Result<Option<Attachment>, MockError> {
        let mocker = Mocker::upgrade(&self.inner.mocker)?;
        let attachment = mocker.state.attachments.borrow().get(self.id()).cloned();
        Ok(attachment)
    }

    /// The contact that sent this message.
    ///
    /// Messages composed with [`ContactMock::say`] return the speaker
    /// itself. Bot-side messages look the sender up by id, preferring the
    /// default contact kind.
    pub fn talker(&self) -> Result<ContactMock, MockError> {
        if let Some(talker) = &self.inner.talker {
            return Ok(talker.clone());
        }
        let mocker = Mocker::upgrade(&self.inner.mocker)?;
        mocker
            .load_contact(self.talker_id())
            .ok()
            .or_else(|| mocker.find_contact(self.talker_id()))
            .ok_or_else(|| MockError::NotFound {
                kind: "contact",
                id: self.talker_id().to_string(),
            })
    }

    /// The room this message was sent in, for room messages.
    pub fn room(&self) -> Result<Option<RoomMock>, MockError> {
        match self.inner.payload.room_id() {
            Some(room_id) => {
                let mocker = Mocker::upgrade(&self.inner.mocker)?;
                RoomMock::load(&mocker, room_id).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl Accessory for MessageMock {
    fn id(&self) -> &str {
        &self.inner.payload.id
    }

    fn accessory_type(&self) -> &'static str {
        "message"
    }
}

impl PartialEq for MessageMock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for MessageMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageMock")
            .field("payload", &self.inner.payload)
            .finish()
    }
}
