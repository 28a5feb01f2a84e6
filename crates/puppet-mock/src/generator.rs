//! Random fixture generation: sentences, contacts and rooms.

use std::ops::RangeInclusive;

use puppet_core::{ContactGender, ContactPayload, RoomPayload};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::{Builder, Uuid};

const WORDS: &[&str] = &[
    "about", "after", "again", "apple", "around", "bring", "brown", "cloud", "coffee", "could",
    "dinner", "early", "every", "father", "field", "first", "friend", "garden", "great", "happy",
    "house", "later", "letter", "light", "little", "maybe", "morning", "mother", "music", "never",
    "night", "often", "paper", "party", "people", "place", "quick", "quiet", "river", "right",
    "round", "school", "should", "small", "sound", "still", "story", "summer", "table", "thanks",
    "there", "think", "today", "train", "water", "weekend", "where", "window", "world", "would",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Bao", "Carmen", "Dmitri", "Emeka", "Farah", "Giulia", "Hana", "Ines", "Jun", "Kofi",
    "Lena", "Mateo", "Nadia", "Omar", "Priya", "Quinn", "Rosa", "Sven", "Tomoko",
];

const CITIES: &[&str] = &[
    "Lisbon", "Nairobi", "Osaka", "Quito", "Tallinn", "Hanoi", "Porto", "Leeds",
];

const TOPICS: &[&str] = &[
    "Book Club", "Climbing", "Family", "Hackathon", "Neighbors", "Road Trip", "Study Group",
];

/// Generate a random UUID from `rng`.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Generate a sentence of random words.
///
/// The result is never empty: it starts with a capital letter and ends with
/// a period, and its word count is drawn from `words`.
pub fn generate_sentence<R: Rng + ?Sized>(rng: &mut R, words: RangeInclusive<usize>) -> String {
    let min = (*words.start()).max(1);
    let max = (*words.end()).max(min);
    let count = rng.gen_range(min..=max);

    let mut sentence = (0..count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(first) = sentence.get(..1) {
        let capital = first.to_ascii_uppercase();
        sentence.replace_range(..1, &capital);
    }
    sentence.push('.');
    sentence
}

/// Generate a random individual contact payload.
pub fn generate_contact_payload<R: Rng + ?Sized>(rng: &mut R) -> ContactPayload {
    let id = format!("contact-{}", generate_id(rng).simple());
    let name = FIRST_NAMES.choose(rng).copied().unwrap_or("Anonymous");
    let gender = match rng.gen_range(0..3) {
        0 => ContactGender::Male,
        1 => ContactGender::Female,
        _ => ContactGender::Unknown,
    };

    let mut payload = ContactPayload::new(id, name).with_gender(gender);
    payload.avatar = format!("https://avatars.example.com/{}.png", payload.id);
    payload.city = CITIES.choose(rng).map(|city| city.to_string());
    payload.friend = Some(rng.gen_bool(0.5));
    payload.signature = Some(generate_sentence(rng, 3..=6));
    payload
}

/// Generate a random room payload with the given members.
///
/// The first member, if any, becomes the owner.
pub fn generate_room_payload<R: Rng + ?Sized>(rng: &mut R, member_ids: &[String]) -> RoomPayload {
    let id = format!("room-{}", generate_id(rng).simple());
    let topic = TOPICS.choose(rng).copied().unwrap_or("Chat");

    let mut payload = RoomPayload::new(id, topic).with_members(member_ids.iter().cloned());
    payload.owner_id = member_ids.first().cloned();
    payload
}
