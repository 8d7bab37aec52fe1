//! Test fixtures for scheduler and store tests.
//!
//! Everything here pins the clock to a fixed instant so scheduling
//! assertions are exact.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::Card;
use crate::store::CardStore;

/// The fixed review instant used across tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A standalone card with the given id, due immediately at `fixed_now`.
pub fn sample_card(id: i64) -> Card {
    let mut card = Card::new(1, format!("question {id}"), format!("answer {id}"), fixed_now());
    card.id = id;
    card
}

/// Store seeded with one deck and `count` cards, all due at `fixed_now`.
///
/// Returns the store plus the ids of the created cards.
pub fn seeded_store(count: usize) -> (CardStore, Vec<i64>) {
    let store = CardStore::new();
    let deck = store
        .create_deck("Sample deck".into(), None, fixed_now())
        .expect("fresh store accepts a deck");
    let ids = (0..count)
        .map(|i| {
            store
                .create_card(deck.id, format!("q{i}"), format!("a{i}"), fixed_now())
                .expect("card insert into seeded deck")
                .id
        })
        .collect();
    (store, ids)
}
