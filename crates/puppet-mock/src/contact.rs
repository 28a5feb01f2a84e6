//! Mock contacts: the per-kind contact registry and the message composer.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use puppet_core::{ContactPayload, Conversation, MessagePayload};
use tracing::{debug, trace};

use crate::accessory::{Accessory, ConversationTarget, Observers};
use crate::error::MockError;
use crate::message::MessageMock;
use crate::mocker::{now_millis, Mocker, MockerState};
use crate::sayable::Sayable;

/// A kind of mock contact.
///
/// Every kind gets its own isolated pool inside a [`Mocker`], so the same
/// identity can exist once per kind. Declare a new kind with a unit struct:
///
/// ```rust
/// use puppet_mock::ContactKind;
///
/// struct Customer;
///
/// impl ContactKind for Customer {
///     const NAME: &'static str = "Customer";
/// }
/// ```
pub trait ContactKind: 'static {
    /// Name used in logs and errors.
    const NAME: &'static str;

    /// Abstract kinds have no pool and reject every registry operation.
    const ABSTRACT: bool = false;
}

/// The default contact kind used by [`Mocker::create_contact`].
#[derive(Debug, Clone, Copy)]
pub struct MockContact;

impl ContactKind for MockContact {
    const NAME: &'static str = "MockContact";
}

/// The abstract base kind. Creating or loading through it fails with
/// [`MockError::DirectUse`].
#[derive(Debug, Clone, Copy)]
pub struct AbstractContact;

impl ContactKind for AbstractContact {
    const NAME: &'static str = "ContactMock";
    const ABSTRACT: bool = true;
}

struct ContactInner {
    id: String,
    kind: &'static str,
    payload: RefCell<ContactPayload>,
    observers: Observers<MessageMock>,
    mocker: Weak<MockerState>,
}

/// A fake contact that can say things to other contacts and rooms.
///
/// `ContactMock` is a cheap handle; clones refer to the same contact.
#[derive(Clone)]
pub struct ContactMock {
    inner: Rc<ContactInner>,
}

impl ContactMock {
    /// Load an existing contact from the pool of kind `K`.
    pub fn load<K: ContactKind>(mocker: &Mocker, id: &str) -> Result<Self, MockError> {
        mocker.with_contact_pool::<K, _>(|pool| pool.load(id))
    }

    /// Create a contact in the pool of kind `K`.
    ///
    /// Fails if the identity is already registered for this kind. On
    /// success the payload is also registered with the mocker.
    pub fn create<K: ContactKind>(mocker: &Mocker, payload: ContactPayload) -> Result<Self, MockError> {
        debug!("{}::create({})", K::NAME, payload.id);

        let contact = Self {
            inner: Rc::new(ContactInner {
                id: payload.id.clone(),
                kind: K::NAME,
                payload: RefCell::new(payload.clone()),
                observers: Observers::new(),
                mocker: mocker.downgrade(),
            }),
        };

        mocker.with_contact_pool::<K, _>(|pool| pool.insert(contact.id(), contact.clone()))?;
        mocker.register_contact_payload(payload);

        Ok(contact)
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Name of the kind this contact was created as.
    pub fn kind(&self) -> &'static str {
        self.inner.kind
    }

    /// Snapshot of the current payload.
    pub fn payload(&self) -> ContactPayload {
        self.inner.payload.borrow().clone()
    }

    pub fn name(&self) -> String {
        self.inner.payload.borrow().name.clone()
    }

    /// Modify the payload in place and re-register it with the mocker.
    ///
    /// The identity can not be changed; any edit to `id` is reverted.
    pub fn update_payload(&self, update: impl FnOnce(&mut ContactPayload)) -> Result<(), MockError> {
        let mocker = self.mocker()?;
        let payload = {
            let mut payload = self.inner.payload.borrow_mut();
            update(&mut *payload);
            payload.id = self.inner.id.clone();
            payload.clone()
        };
        mocker.register_contact_payload(payload);
        Ok(())
    }

    /// Start composing a message.
    ///
    /// Nothing is sent until [`Say::to`] or [`Say::to_random`] is called.
    pub fn say(&self, content: impl Into<Sayable>) -> Say<'_> {
        Say {
            speaker: self,
            content: content.into(),
            mentions: Vec::new(),
        }
    }

    /// Register a handler called with every message addressed to this
    /// contact.
    pub fn on_message(&self, handler: impl FnMut(&MessageMock) + 'static) -> &Self {
        self.inner.observers.subscribe(handler);
        self
    }

    pub(crate) fn notify_message(&self, message: &MessageMock) {
        trace!("{} {} received message {}", self.kind(), self.id(), message.id());
        self.inner.observers.notify(message);
    }

    fn mocker(&self) -> Result<Mocker, MockError> {
        Mocker::upgrade(&self.inner.mocker)
    }
}

impl Accessory for ContactMock {
    fn id(&self) -> &str {
        &self.inner.id
    }

    fn accessory_type(&self) -> &'static str {
        "contact"
    }

    fn as_conversation(&self) -> Option<ConversationTarget> {
        Some(ConversationTarget::Contact(self.clone()))
    }
}

impl PartialEq for ContactMock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ContactMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactMock")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind)
            .finish()
    }
}

/// A message being composed by a contact.
#[must_use = "nothing is sent until `to` or `to_random` is called"]
pub struct Say<'a> {
    speaker: &'a ContactMock,
    content: Sayable,
    mentions: Vec<ContactMock>,
}

impl Say<'_> {
    /// Mention a contact. Mentions only apply to room messages.
    pub fn mention(mut self, contact: &ContactMock) -> Self {
        self.mentions.push(contact.clone());
        self
    }

    /// Mention several contacts.
    pub fn mentions<'c>(mut self, contacts: impl IntoIterator<Item = &'c ContactMock>) -> Self {
        self.mentions.extend(contacts.into_iter().cloned());
        self
    }

    /// Send to a contact or room.
    ///
    /// Any other target fails with [`MockError::UnknownConversationType`]
    /// before anything is stored or emitted.
    pub fn to(self, target: &dyn Accessory) -> Result<MessageMock, MockError> {
        self.send(Some(target))
    }

    /// Send to a randomly picked contact or room.
    pub fn to_random(self) -> Result<MessageMock, MockError> {
        self.send(None)
    }

    fn send(self, target: Option<&dyn Accessory>) -> Result<MessageMock, MockError> {
        let mocker = self.speaker.mocker()?;

        let target = match target {
            Some(target) => target.as_conversation().ok_or_else(|| {
                MockError::UnknownConversationType(target.accessory_type().to_string())
            })?,
            None => mocker.random_conversation()?,
        };

        let message_type = self.content.message_type();
        debug!(
            "{}::say({:?}{}).to({})",
            self.speaker.kind(),
            message_type,
            if self.mentions.is_empty() {
                String::new()
            } else {
                format!(
                    ",[{}]",
                    self.mentions.iter().map(|c| c.id()).collect::<Vec<_>>().join(",")
                )
            },
            target.id()
        );

        let conversation = match &target {
            ConversationTarget::Contact(contact) => Conversation::to(contact.id()),
            ConversationTarget::Room(room) => Conversation::room(
                room.id(),
                self.mentions.iter().map(|c| c.id().to_string()).collect(),
            ),
        };

        let mut payload = MessagePayload::new(
            mocker.next_message_id(),
            now_millis(),
            message_type,
            self.speaker.id(),
            conversation,
        );

        match &self.content {
            Sayable::Text(_) | Sayable::Nothing => {
                let text = match self.content.text() {
                    Some(text) => text.to_string(),
                    None => mocker.generate_sentence(),
                };
                payload.text = Some(text);
            }
            Sayable::File(file) => payload.filename = Some(file.name.clone()),
            Sayable::Contact(_) | Sayable::MiniProgram(_) | Sayable::Url(_) => {}
        }

        let speaker = self.speaker.clone();
        mocker.deliver(payload, self.content.into_attachment(), Some(speaker), Some(target))
    }
}
