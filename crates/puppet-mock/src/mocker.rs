//! The mock world: record pools, message registry, attachment store and events.

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use puppet_core::{ContactPayload, Conversation, MessagePayload, MessageType, PuppetEvent, RoomPayload};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::accessory::ConversationTarget;
use crate::config::{ConfigError, MockerConfig};
use crate::contact::{ContactKind, ContactMock, MockContact};
use crate::error::MockError;
use crate::generator;
use crate::message::{self, MessageMock};
use crate::pool::Pool;
use crate::room::{self, RoomMock};
use crate::sayable::Attachment;

/// Shared state behind a [`Mocker`] handle.
pub(crate) struct MockerState {
    pub(crate) config: MockerConfig,
    /// One pool per contact kind, created on first use.
    pub(crate) contacts: RefCell<IndexMap<TypeId, Pool<ContactMock>>>,
    pub(crate) rooms: RefCell<Pool<RoomMock>>,
    pub(crate) messages: RefCell<Pool<MessageMock>>,
    pub(crate) attachments: RefCell<HashMap<String, Attachment>>,
    contact_payloads: RefCell<HashMap<String, ContactPayload>>,
    room_payloads: RefCell<HashMap<String, RoomPayload>>,
    rng: RefCell<StdRng>,
    events: broadcast::Sender<PuppetEvent>,
}

/// A self-contained mock chat world.
///
/// The mocker owns every contact, room and message created through it and
/// plays the puppet: each delivered message is announced as a
/// [`PuppetEvent::Message`] on a broadcast channel. Cloning a `Mocker` gives
/// another handle to the same world.
///
/// Everything runs synchronously on the calling thread.
#[derive(Clone)]
pub struct Mocker {
    pub(crate) state: Rc<MockerState>,
}

impl Mocker {
    /// Create an empty mock world.
    pub fn new(config: MockerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        debug!("Mocker created (seed: {:?})", config.seed);

        Self {
            state: Rc::new(MockerState {
                config,
                contacts: RefCell::new(IndexMap::new()),
                rooms: RefCell::new(Pool::new(room::KIND)),
                messages: RefCell::new(Pool::new(message::KIND)),
                attachments: RefCell::new(HashMap::new()),
                contact_payloads: RefCell::new(HashMap::new()),
                room_payloads: RefCell::new(HashMap::new()),
                rng: RefCell::new(rng),
                events,
            }),
        }
    }

    /// Create a mock world configured from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(MockerConfig::from_env()?))
    }

    pub fn config(&self) -> &MockerConfig {
        &self.state.config
    }

    /// Subscribe to puppet events.
    ///
    /// Only events emitted after subscribing are received.
    pub fn subscribe(&self) -> broadcast::Receiver<PuppetEvent> {
        self.state.events.subscribe()
    }

    pub(crate) fn downgrade(&self) -> Weak<MockerState> {
        Rc::downgrade(&self.state)
    }

    pub(crate) fn upgrade(state: &Weak<MockerState>) -> Result<Self, MockError> {
        state
            .upgrade()
            .map(|state| Self { state })
            .ok_or(MockError::Detached)
    }

    /// Run `f` against the pool of contact kind `K`, creating the pool if
    /// this is the first time the kind is used.
    pub(crate) fn with_contact_pool<K, R>(
        &self,
        f: impl FnOnce(&mut Pool<ContactMock>) -> Result<R, MockError>,
    ) -> Result<R, MockError>
    where
        K: ContactKind,
    {
        if K::ABSTRACT {
            return Err(MockError::DirectUse(K::NAME));
        }

        let mut pools = self.state.contacts.borrow_mut();
        let pool = pools.entry(TypeId::of::<K>()).or_insert_with(|| {
            debug!("{} pool initialized", K::NAME);
            Pool::new(K::NAME)
        });
        f(pool)
    }

    // ------------------------------------------------------------------
    // Payload store
    // ------------------------------------------------------------------

    pub(crate) fn register_contact_payload(&self, payload: ContactPayload) {
        trace!("contact payload registered: {}", payload.id);
        self.state
            .contact_payloads
            .borrow_mut()
            .insert(payload.id.clone(), payload);
    }

    pub(crate) fn register_room_payload(&self, payload: RoomPayload) {
        trace!("room payload registered: {}", payload.id);
        self.state
            .room_payloads
            .borrow_mut()
            .insert(payload.id.clone(), payload);
    }

    /// The payload registered for a contact, as the puppet would report it.
    pub fn contact_payload(&self, id: &str) -> Option<ContactPayload> {
        self.state.contact_payloads.borrow().get(id).cloned()
    }

    /// The payload registered for a room, as the puppet would report it.
    pub fn room_payload(&self, id: &str) -> Option<RoomPayload> {
        self.state.room_payloads.borrow().get(id).cloned()
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    /// Create a contact of the default [`MockContact`] kind.
    pub fn create_contact(&self, payload: ContactPayload) -> Result<ContactMock, MockError> {
        ContactMock::create::<MockContact>(self, payload)
    }

    /// Load a contact of the default [`MockContact`] kind.
    pub fn load_contact(&self, id: &str) -> Result<ContactMock, MockError> {
        ContactMock::load::<MockContact>(self, id)
    }

    pub fn create_room(&self, payload: RoomPayload) -> Result<RoomMock, MockError> {
        RoomMock::create(self, payload)
    }

    pub fn load_room(&self, id: &str) -> Result<RoomMock, MockError> {
        RoomMock::load(self, id)
    }

    pub fn load_message(&self, id: &str) -> Result<MessageMock, MockError> {
        MessageMock::load(self, id)
    }

    /// Create `count` contacts with generated payloads.
    pub fn create_contacts(&self, count: usize) -> Result<Vec<ContactMock>, MockError> {
        (0..count)
            .map(|_| {
                let payload = generator::generate_contact_payload(&mut *self.state.rng.borrow_mut());
                self.create_contact(payload)
            })
            .collect()
    }

    /// Create a room with a generated topic and the given members.
    pub fn create_random_room(&self, members: &[ContactMock]) -> Result<RoomMock, MockError> {
        let member_ids: Vec<String> = members.iter().map(|c| c.id().to_string()).collect();
        let payload = generator::generate_room_payload(&mut *self.state.rng.borrow_mut(), &member_ids);
        self.create_room(payload)
    }

    /// Find a contact of any kind.
    pub fn find_contact(&self, id: &str) -> Option<ContactMock> {
        self.state
            .contacts
            .borrow()
            .values()
            .find_map(|pool| pool.get(id).cloned())
    }

    /// Every contact registered under `id`, one per kind that has it.
    pub fn find_contacts(&self, id: &str) -> Vec<ContactMock> {
        self.state
            .contacts
            .borrow()
            .values()
            .filter_map(|pool| pool.get(id).cloned())
            .collect()
    }

    /// Every contact of every kind, in creation order per kind.
    pub fn contacts(&self) -> Vec<ContactMock> {
        self.state
            .contacts
            .borrow()
            .values()
            .flat_map(|pool| pool.values().cloned())
            .collect()
    }

    pub fn rooms(&self) -> Vec<RoomMock> {
        self.state.rooms.borrow().values().cloned().collect()
    }

    /// Every message delivered so far, oldest first.
    pub fn messages(&self) -> Vec<MessageMock> {
        self.state.messages.borrow().values().cloned().collect()
    }

    pub fn message_count(&self) -> usize {
        self.state.messages.borrow().len()
    }

    // ------------------------------------------------------------------
    // Randomness
    // ------------------------------------------------------------------

    pub fn random_contact(&self) -> Option<ContactMock> {
        let contacts = self.contacts();
        self.pick(contacts.len()).map(|i| contacts[i].clone())
    }

    pub fn random_room(&self) -> Option<RoomMock> {
        let rooms = self.rooms();
        self.pick(rooms.len()).map(|i| rooms[i].clone())
    }

    /// Pick a random contact or room to talk to.
    pub fn random_conversation(&self) -> Result<ConversationTarget, MockError> {
        let contacts = self.contacts();
        let rooms = self.rooms();

        match self.pick(contacts.len() + rooms.len()) {
            Some(i) if i < contacts.len() => Ok(ConversationTarget::Contact(contacts[i].clone())),
            Some(i) => Ok(ConversationTarget::Room(rooms[i - contacts.len()].clone())),
            None => Err(MockError::UnknownConversationType(
                "no contact or room to talk to".to_string(),
            )),
        }
    }

    fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.state.rng.borrow_mut().gen_range(0..len))
    }

    /// Generate a random sentence with the configured length bounds.
    pub fn generate_sentence(&self) -> String {
        let words = self.state.config.sentence_words();
        generator::generate_sentence(&mut *self.state.rng.borrow_mut(), words)
    }

    pub(crate) fn next_message_id(&self) -> String {
        generator::generate_id(&mut *self.state.rng.borrow_mut()).to_string()
    }

    // ------------------------------------------------------------------
    // Delivery
    // ------------------------------------------------------------------

    /// Deliver a message from the bot side into the mock world.
    ///
    /// The message is registered, announced on the event channel and
    /// handed to the observers of the room it is addressed to, or of every
    /// contact registered under the recipient id, whatever its kind.
    pub fn send_message(&self, payload: MessagePayload) -> Result<MessageMock, MockError> {
        self.deliver(payload, None, None, None)
    }

    /// Register a message and announce it.
    ///
    /// Side effects happen in this order: attachment stored, message
    /// created, event emitted, conversation observers notified. Nothing
    /// happens if the message id is already taken.
    ///
    /// When `target` is given only that exact record is notified; otherwise
    /// the recipient is resolved from the payload.
    pub(crate) fn deliver(
        &self,
        payload: MessagePayload,
        attachment: Option<Attachment>,
        talker: Option<ContactMock>,
        target: Option<ConversationTarget>,
    ) -> Result<MessageMock, MockError> {
        if self.state.messages.borrow().contains(&payload.id) {
            return Err(MockError::AlreadyExists {
                kind: message::KIND,
                id: payload.id,
            });
        }

        if payload.message_type != MessageType::Text {
            if let Some(attachment) = attachment {
                MessageMock::set_attachment(self, &payload.id, attachment);
            }
        }

        let message = MessageMock::register(self, payload, talker)?;
        self.emit(PuppetEvent::message(message.id()));
        self.notify_conversation(&message, target);

        Ok(message)
    }

    fn emit(&self, event: PuppetEvent) {
        trace!("emit {:?}", event);
        if self.state.events.send(event).is_err() {
            trace!("no event subscribers");
        }
    }

    fn notify_conversation(&self, message: &MessageMock, target: Option<ConversationTarget>) {
        if let Some(target) = target {
            match target {
                ConversationTarget::Contact(contact) => contact.notify_message(message),
                ConversationTarget::Room(room) => room.notify_message(message),
            }
            return;
        }

        match message.conversation() {
            Conversation::To { to_id } => {
                for contact in self.find_contacts(to_id) {
                    contact.notify_message(message);
                }
            }
            Conversation::Room { room_id, .. } => {
                if let Ok(room) = self.load_room(room_id) {
                    room.notify_message(message);
                }
            }
        }
    }
}

impl Default for Mocker {
    fn default() -> Self {
        Self::new(MockerConfig::default())
    }
}

impl fmt::Debug for Mocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mocker")
            .field("contacts", &self.contacts().len())
            .field("rooms", &self.state.rooms.borrow().len())
            .field("messages", &self.message_count())
            .finish()
    }
}

/// Current time in milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
