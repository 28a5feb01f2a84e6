//! Mock chatter example.
//!
//! Builds a small mock world, lets the contacts talk for a few rounds and
//! prints every message event the puppet emits.
//!
//! Run with: cargo run -p puppet-mock --example chatter
//!
//! Configuration via .env file or environment variables:
//!   MOCKER_SEED                - RNG seed for a reproducible run
//!   MOCKER_EVENT_CAPACITY      - Event channel capacity (default: 64)
//!   MOCKER_SENTENCE_MIN_WORDS  - Shortest generated sentence (default: 3)
//!   MOCKER_SENTENCE_MAX_WORDS  - Longest generated sentence (default: 12)

use puppet_core::{FileBox, UrlLinkPayload};
use puppet_mock::{Mocker, PuppetEvent};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("puppet_mock=debug".parse()?),
        )
        .init();

    let mocker = Mocker::from_env()?;
    let mut events = mocker.subscribe();

    let contacts = mocker.create_contacts(4)?;
    let room = mocker.create_random_room(&contacts)?;
    info!("Room {} ({}) with {} members", room.id(), room.topic(), contacts.len());

    for contact in &contacts {
        let name = contact.name();
        contact.on_message(move |message| {
            info!("{} got {:?}: {:?}", name, message.message_type(), message.text());
        });
    }

    let (first, rest) = contacts.split_first().ok_or("no contacts")?;
    first.say("Hello everyone!").mentions(rest).to(&room)?;
    first.say(FileBox::from_bytes("holiday.jpg", vec![0xFF, 0xD8])).to(&room)?;

    for contact in rest {
        contact.say(Option::<String>::None).to(first)?;
    }

    let link = UrlLinkPayload::new("https://example.com/party", "Party on Friday");
    rest[0].say(link).to_random()?;

    while let Ok(PuppetEvent::Message(event)) = events.try_recv() {
        let message = mocker.load_message(&event.message_id)?;
        println!(
            "{} -> {}: [{:?}] {}",
            message.talker().map(|c| c.name()).unwrap_or_default(),
            message.conversation().id(),
            message.message_type(),
            message.text().unwrap_or("")
        );
    }

    Ok(())
}
