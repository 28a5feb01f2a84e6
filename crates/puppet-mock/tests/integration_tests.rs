//! Integration tests for puppet-mock.
//!
//! These drive the public API end to end: registering contacts and rooms,
//! composing messages and observing the events and records they produce.
//!
//! Run with:
//!   cargo test -p puppet-mock --test integration_tests

use std::cell::RefCell;
use std::rc::Rc;

use puppet_core::{
    ContactPayload, FileBox, MessageType, MiniProgramPayload, RoomPayload, UrlLinkPayload,
    OCTET_STREAM,
};
use puppet_mock::{
    AbstractContact, Attachment, ContactKind, ContactMock, MessageMock, MockError, Mocker,
    MockerConfig, PuppetEvent, RoomMock,
};
use tokio::sync::broadcast::error::TryRecvError;

/// Helper to build a reproducible mocker.
fn mocker() -> Mocker {
    Mocker::new(MockerConfig::with_seed(2024))
}

/// Helper to build a mocker with contact "c1" and room "r1".
fn world() -> (Mocker, ContactMock, RoomMock) {
    let mocker = mocker();
    let contact = mocker
        .create_contact(ContactPayload::new("c1", "Alice"))
        .unwrap();
    let room = mocker
        .create_room(RoomPayload::new("r1", "Friends").with_members(["c1"]))
        .unwrap();
    (mocker, contact, room)
}

// ============================================================================
// Registry
// ============================================================================

mod registry_tests {
    use super::*;

    struct Agent;

    impl ContactKind for Agent {
        const NAME: &'static str = "Agent";
    }

    #[test]
    fn test_create_then_load_many() {
        let mocker = mocker();
        for i in 0..10 {
            let id = format!("c{}", i);
            mocker.create_contact(ContactPayload::new(&id, "Someone")).unwrap();
            assert_eq!(mocker.load_contact(&id).unwrap().id(), id);
        }
        assert_eq!(mocker.contacts().len(), 10);
    }

    #[test]
    fn test_recreate_fails_and_original_survives() {
        let mocker = mocker();
        let original = mocker
            .create_contact(ContactPayload::new("c1", "Alice").with_alias("Al"))
            .unwrap();

        let err = mocker
            .create_contact(ContactPayload::new("c1", "Impostor"))
            .unwrap_err();
        assert!(matches!(err, MockError::AlreadyExists { ref id, .. } if id == "c1"));
        assert!(err.to_string().contains("load(c1)"));

        let loaded = mocker.load_contact("c1").unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.payload().alias.as_deref(), Some("Al"));
    }

    #[test]
    fn test_load_never_created() {
        let mocker = mocker();
        let err = mocker.load_contact("nobody").unwrap_err();
        assert!(matches!(err, MockError::NotFound { .. }));
        assert_eq!(err.to_string(), "MockContact nobody does not exist");
    }

    #[test]
    fn test_pools_are_per_kind() {
        let mocker = mocker();
        mocker.create_contact(ContactPayload::new("c1", "Alice")).unwrap();

        assert!(ContactMock::load::<Agent>(&mocker, "c1").is_err());
        let agent = ContactMock::create::<Agent>(&mocker, ContactPayload::new("c1", "Agent Alice")).unwrap();
        assert_eq!(agent.kind(), "Agent");
        assert_eq!(ContactMock::load::<Agent>(&mocker, "c1").unwrap(), agent);
    }

    #[test]
    fn test_same_id_in_two_kinds_routes_to_the_exact_contact() {
        let mocker = mocker();
        let plain = mocker.create_contact(ContactPayload::new("c1", "Alice")).unwrap();
        let agent = ContactMock::create::<Agent>(&mocker, ContactPayload::new("c1", "Agent Alice")).unwrap();

        let plain_hits = Rc::new(RefCell::new(0));
        let agent_hits = Rc::new(RefCell::new(0));
        let counter = plain_hits.clone();
        plain.on_message(move |_| *counter.borrow_mut() += 1);
        let counter = agent_hits.clone();
        agent.on_message(move |_| *counter.borrow_mut() += 1);

        let to_agent = plain.say("hi agent").to(&agent).unwrap();
        assert_eq!((*plain_hits.borrow(), *agent_hits.borrow()), (0, 1));
        assert_eq!(to_agent.talker().unwrap(), plain);

        let to_plain = agent.say("hi plain").to(&plain).unwrap();
        assert_eq!((*plain_hits.borrow(), *agent_hits.borrow()), (1, 1));
        assert_eq!(to_plain.talker().unwrap(), agent);
        assert_eq!(to_plain.talker().unwrap().kind(), "Agent");
    }

    #[test]
    fn test_bot_message_reaches_every_kind_with_the_id() {
        let mocker = mocker();
        let plain = mocker.create_contact(ContactPayload::new("c1", "Alice")).unwrap();
        let agent = ContactMock::create::<Agent>(&mocker, ContactPayload::new("c1", "Agent Alice")).unwrap();

        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = hits.clone();
        plain.on_message(move |_| sink.borrow_mut().push("MockContact"));
        let sink = hits.clone();
        agent.on_message(move |_| sink.borrow_mut().push("Agent"));

        let payload = puppet_core::MessagePayload::text(
            "m1",
            1,
            "c1",
            "from the bot",
            puppet_core::Conversation::to("c1"),
        );
        let message = mocker.send_message(payload).unwrap();

        assert_eq!(*hits.borrow(), vec!["MockContact", "Agent"]);
        assert_eq!(message.talker().unwrap(), plain);
    }

    #[test]
    fn test_pools_are_per_mocker() {
        let a = mocker();
        let b = mocker();
        a.create_contact(ContactPayload::new("c1", "Alice")).unwrap();

        assert!(b.load_contact("c1").is_err());
        assert!(b.create_contact(ContactPayload::new("c1", "Alice")).is_ok());
    }

    #[test]
    fn test_abstract_kind_is_direct_use() {
        let mocker = mocker();
        let err = ContactMock::create::<AbstractContact>(&mocker, ContactPayload::new("c1", "A"))
            .unwrap_err();
        assert!(matches!(err, MockError::DirectUse(_)));
        assert!(matches!(
            ContactMock::load::<AbstractContact>(&mocker, "c1"),
            Err(MockError::DirectUse(_))
        ));
    }

    #[test]
    fn test_create_registers_payload() {
        let mocker = mocker();
        mocker.create_contact(ContactPayload::new("c1", "Alice")).unwrap();
        assert_eq!(mocker.contact_payload("c1").unwrap().name, "Alice");
    }
}

// ============================================================================
// Classification
// ============================================================================

mod classification_tests {
    use super::*;

    fn send_file(file: FileBox) -> MessageMock {
        let (_mocker, alice, room) = world();
        alice.say(file).to(&room).unwrap()
    }

    #[test]
    fn test_png_by_mime_type_is_image() {
        let file = FileBox::from_bytes("blob", vec![1]).with_mime_type("image/png");
        assert_eq!(send_file(file).message_type(), MessageType::Image);
    }

    #[test]
    fn test_png_by_extension_is_image() {
        let file = FileBox::from_bytes("cat.png", vec![1]);
        assert_eq!(send_file(file).message_type(), MessageType::Image);
    }

    #[test]
    fn test_jpeg_variants_are_image() {
        for name in ["a.jpg", "a.jpeg"] {
            assert_eq!(send_file(FileBox::from_bytes(name, vec![1])).message_type(), MessageType::Image);
        }
        let file = FileBox::from_bytes("blob", vec![1]).with_mime_type("image/jpeg");
        assert_eq!(send_file(file).message_type(), MessageType::Image);
    }

    #[test]
    fn test_mp4_is_audio() {
        let file = FileBox::from_bytes("clip", vec![1]).with_mime_type("video/mp4");
        assert_eq!(send_file(file).message_type(), MessageType::Audio);
        assert_eq!(send_file(FileBox::from_bytes("clip.mp4", vec![1])).message_type(), MessageType::Audio);
    }

    #[test]
    fn test_unrecognized_is_unknown() {
        let file = FileBox::from_bytes("doc.pdf", vec![1]).with_mime_type("application/pdf");
        assert_eq!(send_file(file).message_type(), MessageType::Unknown);
        assert_eq!(send_file(FileBox::from_bytes("doc.pdf", vec![1])).message_type(), MessageType::Unknown);
    }

    #[test]
    fn test_generic_mime_type_sniffs_extension() {
        let file = FileBox::from_bytes("cat.png", vec![1]).with_mime_type(OCTET_STREAM);
        assert_eq!(send_file(file).message_type(), MessageType::Image);
    }

    #[test]
    fn test_file_message_records_filename_and_attachment() {
        let (_mocker, alice, room) = world();
        let file = FileBox::from_bytes("cat.png", vec![1, 2, 3]);
        let message = alice.say(file.clone()).to(&room).unwrap();

        assert_eq!(message.payload().filename.as_deref(), Some("cat.png"));
        assert_eq!(message.text(), None);
        assert_eq!(message.attachment().unwrap(), Some(Attachment::File(file)));
    }

    #[test]
    fn test_contact_card() {
        let (mocker, alice, room) = world();
        let bob = mocker.create_contact(ContactPayload::new("c2", "Bob")).unwrap();

        let message = alice.say(&bob).to(&room).unwrap();
        assert_eq!(message.message_type(), MessageType::Contact);
        assert_eq!(message.attachment().unwrap(), Some(Attachment::Contact(bob)));
    }

    #[test]
    fn test_mini_program_and_url() {
        let (_mocker, alice, room) = world();

        let mini = MiniProgramPayload::new("wx123", "Game");
        let message = alice.say(mini.clone()).to(&room).unwrap();
        assert_eq!(message.message_type(), MessageType::MiniProgram);
        assert_eq!(message.attachment().unwrap(), Some(Attachment::MiniProgram(mini)));

        let url = UrlLinkPayload::new("https://example.com", "Example").with_description("A page");
        let message = alice.say(url.clone()).to(&room).unwrap();
        assert_eq!(message.message_type(), MessageType::Url);
        assert_eq!(message.attachment().unwrap(), Some(Attachment::Url(url)));
    }

    #[test]
    fn test_text_has_no_attachment() {
        let (_mocker, alice, room) = world();
        let message = alice.say("plain").to(&room).unwrap();
        assert_eq!(message.message_type(), MessageType::Text);
        assert_eq!(message.attachment().unwrap(), None);
    }
}

// ============================================================================
// Composition and delivery
// ============================================================================

mod compose_tests {
    use super::*;

    struct Stranger;

    impl puppet_mock::Accessory for Stranger {
        fn id(&self) -> &str {
            "s1"
        }

        fn accessory_type(&self) -> &'static str {
            "stranger"
        }
    }

    #[test]
    fn test_hello_to_room() {
        let (mocker, alice, room) = world();
        let mut events = mocker.subscribe();

        let message = alice.say("hello").to(&room).unwrap();

        assert_eq!(message.message_type(), MessageType::Text);
        assert_eq!(message.text(), Some("hello"));
        assert_eq!(message.payload().room_id(), Some("r1"));
        assert_eq!(message.talker_id(), "c1");
        assert_eq!(mocker.message_count(), 1);
        assert_eq!(events.try_recv().unwrap(), PuppetEvent::message(message.id()));
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_nothing_to_nobody() {
        let (mocker, alice, _room) = world();
        mocker.create_contacts(3).unwrap();

        let message = alice.say(Option::<String>::None).to_random().unwrap();

        assert_eq!(message.message_type(), MessageType::Text);
        assert!(!message.text().unwrap().is_empty());
        let target = message.conversation().id();
        assert!(mocker.find_contact(target).is_some() || mocker.load_room(target).is_ok());
    }

    #[test]
    fn test_room_target_always_has_mentions() {
        let (mocker, alice, room) = world();
        let bob = mocker.create_contact(ContactPayload::new("c2", "Bob")).unwrap();

        let plain = alice.say("hi").to(&room).unwrap();
        assert_eq!(plain.payload().mention_id_list(), Some(&[] as &[String]));
        assert_eq!(plain.payload().to_id(), None);

        let mentioned = alice.say("hi bob").mention(&bob).to(&room).unwrap();
        assert_eq!(mentioned.payload().mention_id_list(), Some(&["c2".to_string()][..]));
        assert_eq!(mentioned.payload().to_id(), None);
    }

    #[test]
    fn test_contact_target_never_has_room_fields() {
        let (mocker, alice, _room) = world();
        let bob = mocker.create_contact(ContactPayload::new("c2", "Bob")).unwrap();

        let message = alice.say("hi").mention(&bob).to(&bob).unwrap();
        assert_eq!(message.payload().to_id(), Some("c2"));
        assert_eq!(message.payload().room_id(), None);
        assert_eq!(message.payload().mention_id_list(), None);

        let json = serde_json::to_value(message.payload()).unwrap();
        assert!(json.get("roomId").is_none());
        assert!(json.get("mentionIdList").is_none());
    }

    #[test]
    fn test_unknown_target_has_no_side_effects() {
        let (mocker, alice, _room) = world();
        let mut events = mocker.subscribe();

        let err = alice
            .say(FileBox::from_bytes("cat.png", vec![1]))
            .to(&Stranger)
            .unwrap_err();

        assert_eq!(err, MockError::UnknownConversationType("stranger".to_string()));
        assert_eq!(mocker.message_count(), 0);
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_message_as_target_is_rejected() {
        let (mocker, alice, room) = world();
        let message = alice.say("first").to(&room).unwrap();

        let err = alice.say("second").to(&message).unwrap_err();
        assert!(matches!(err, MockError::UnknownConversationType(_)));
        assert_eq!(mocker.message_count(), 1);
    }

    #[test]
    fn test_to_random_with_only_the_speaker() {
        let mocker = mocker();
        assert!(mocker.random_conversation().is_err());

        let alice = mocker.create_contact(ContactPayload::new("c1", "Alice")).unwrap();
        let message = alice.say("echo").to_random().unwrap();
        assert_eq!(message.payload().to_id(), Some("c1"));
    }

    #[test]
    fn test_detached_speaker() {
        let alice = {
            let mocker = mocker();
            mocker.create_contact(ContactPayload::new("c1", "Alice")).unwrap()
        };
        assert_eq!(alice.say("anyone?").to_random().unwrap_err(), MockError::Detached);
    }

    #[test]
    fn test_one_event_per_message_in_order() {
        let (mocker, alice, room) = world();
        let mut events = mocker.subscribe();

        let ids: Vec<String> = (0..5)
            .map(|i| alice.say(format!("msg {}", i)).to(&room).unwrap().id().to_string())
            .collect();

        for id in &ids {
            assert_eq!(events.try_recv().unwrap(), PuppetEvent::message(id.as_str()));
        }
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));

        let stored: Vec<String> = mocker.messages().iter().map(|m| m.id().to_string()).collect();
        assert_eq!(stored, ids);
    }

    #[test]
    fn test_side_effects_happen_before_observers() {
        let (mocker, alice, _room) = world();
        let bob = mocker.create_contact(ContactPayload::new("c2", "Bob")).unwrap();
        let mut events = mocker.subscribe();

        let seen = Rc::new(RefCell::new(None));
        let checker = mocker.clone();
        let sink = seen.clone();
        bob.on_message(move |message| {
            let attached = matches!(message.attachment(), Ok(Some(Attachment::File(_))));
            let stored = checker.load_message(message.id()).is_ok();
            let emitted = events.try_recv() == Ok(PuppetEvent::message(message.id()));
            *sink.borrow_mut() = Some((attached, stored, emitted));
        });

        let file = FileBox::from_bytes("cat.png", vec![1, 2, 3]);
        alice.say(file).to(&bob).unwrap();

        assert_eq!(*seen.borrow(), Some((true, true, true)));
    }

    #[test]
    fn test_observers_see_stored_message() {
        let (mocker, alice, room) = world();
        let bob = mocker.create_contact(ContactPayload::new("c2", "Bob")).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let checker = mocker.clone();
        let sink = seen.clone();
        bob.on_message(move |message| {
            // The message is already registered when observers run.
            assert!(checker.load_message(message.id()).is_ok());
            sink.borrow_mut().push(message.text().unwrap_or_default().to_string());
        });

        alice.say("to bob").to(&bob).unwrap();
        alice.say("to room").to(&room).unwrap();

        assert_eq!(*seen.borrow(), vec!["to bob".to_string()]);
    }
}
