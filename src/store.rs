//! In-memory card store with serialized review application.
//!
//! The scheduler transition itself is pure; what it cannot do is protect two
//! concurrent submissions for the same card from overwriting each other. This
//! store owns that discipline: every review goes through one read-modify-write
//! critical section under the store mutex, so a slow submission can never
//! revert a newer state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Card, Deck, ReviewLog, ReviewQuality, ReviewState};
use crate::srs::sm2::{self, Sm2Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    DeckNotFound(i64),
    CardNotFound(i64),
    InvalidQuality(u8),
    /// The store mutex was poisoned by a panicking writer
    Unavailable,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeckNotFound(id) => write!(f, "deck {} not found", id),
            Self::CardNotFound(id) => write!(f, "card {} not found", id),
            Self::InvalidQuality(q) => write!(f, "invalid review quality {} (expected 0-5)", q),
            Self::Unavailable => write!(f, "card store unavailable"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<Sm2Error> for StoreError {
    fn from(err: Sm2Error) -> Self {
        match err {
            Sm2Error::InvalidQuality(q) => Self::InvalidQuality(q),
        }
    }
}

/// Summary returned to the caller after a review is applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewOutcome {
    pub card_id: i64,
    pub interval_days: i64,
    pub repetitions: i64,
    pub ease_factor: f64,
    pub due_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreInner {
    decks: HashMap<i64, Deck>,
    cards: HashMap<i64, Card>,
    logs: Vec<ReviewLog>,
    next_deck_id: i64,
    next_card_id: i64,
}

/// Shared handle to the store; clones refer to the same data.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, StoreError> {
        self.inner.lock().map_err(|_: PoisonError<_>| {
            tracing::error!("card store mutex poisoned, a writer panicked while holding it");
            StoreError::Unavailable
        })
    }

    pub fn create_deck(
        &self,
        title: String,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Deck, StoreError> {
        let mut inner = self.lock()?;
        inner.next_deck_id += 1;
        let deck = Deck {
            id: inner.next_deck_id,
            title,
            description,
            created_at: now,
        };
        inner.decks.insert(deck.id, deck.clone());
        Ok(deck)
    }

    /// Create a card in an existing deck, due immediately.
    pub fn create_card(
        &self,
        deck_id: i64,
        question: String,
        answer: String,
        now: DateTime<Utc>,
    ) -> Result<Card, StoreError> {
        let mut inner = self.lock()?;
        if !inner.decks.contains_key(&deck_id) {
            return Err(StoreError::DeckNotFound(deck_id));
        }
        inner.next_card_id += 1;
        let mut card = Card::new(deck_id, question, answer, now);
        card.id = inner.next_card_id;
        inner.cards.insert(card.id, card.clone());
        Ok(card)
    }

    pub fn get_deck(&self, deck_id: i64) -> Result<Deck, StoreError> {
        let inner = self.lock()?;
        inner
            .decks
            .get(&deck_id)
            .cloned()
            .ok_or(StoreError::DeckNotFound(deck_id))
    }

    pub fn get_card(&self, card_id: i64) -> Result<Card, StoreError> {
        let inner = self.lock()?;
        inner
            .cards
            .get(&card_id)
            .cloned()
            .ok_or(StoreError::CardNotFound(card_id))
    }

    /// Update question/answer text; scheduling state is untouched.
    pub fn update_card(
        &self,
        card_id: i64,
        question: Option<String>,
        answer: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Card, StoreError> {
        let mut inner = self.lock()?;
        let card = inner
            .cards
            .get_mut(&card_id)
            .ok_or(StoreError::CardNotFound(card_id))?;
        if let Some(question) = question {
            card.question = question;
        }
        if let Some(answer) = answer {
            card.answer = answer;
        }
        card.updated_at = now;
        Ok(card.clone())
    }

    /// Delete a card; its scheduling state dies with it. Review history is
    /// retained.
    pub fn delete_card(&self, card_id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner
            .cards
            .remove(&card_id)
            .map(|_| ())
            .ok_or(StoreError::CardNotFound(card_id))
    }

    pub fn all_cards(&self) -> Result<Vec<Card>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.cards.values().cloned().collect())
    }

    pub fn deck_cards(&self, deck_id: i64) -> Result<Vec<Card>, StoreError> {
        let inner = self.lock()?;
        if !inner.decks.contains_key(&deck_id) {
            return Err(StoreError::DeckNotFound(deck_id));
        }
        Ok(inner
            .cards
            .values()
            .filter(|c| c.deck_id == deck_id)
            .cloned()
            .collect())
    }

    /// Apply one graded review to a card.
    ///
    /// Read, transition, and write-back happen under the store lock, which is
    /// what serializes two concurrent reviews of the same card. An invalid
    /// quality leaves the card (and the history) untouched.
    pub fn apply_review(
        &self,
        card_id: i64,
        quality: u8,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome, StoreError> {
        let mut inner = self.lock()?;
        let card = inner
            .cards
            .get_mut(&card_id)
            .ok_or(StoreError::CardNotFound(card_id))?;

        let next: ReviewState = match sm2::compute_next_review(quality, &card.review, now) {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!("Rejected review for card {}: {}", card_id, err);
                return Err(err.into());
            }
        };

        card.review = next;
        card.updated_at = now;
        tracing::info!(
            "Applied review: card {} quality {} -> {}d interval, {} repetitions",
            card_id,
            quality,
            next.interval_days,
            next.repetitions
        );

        let was_correct = ReviewQuality::from_u8(quality).is_some_and(|q| q.is_passing());
        inner.logs.push(ReviewLog::new(
            card_id,
            quality,
            now,
            was_correct,
            next.interval_days,
        ));

        Ok(ReviewOutcome {
            card_id,
            interval_days: next.interval_days,
            repetitions: next.repetitions,
            ease_factor: next.ease_factor,
            due_at: next.due_at,
        })
    }

    /// Review history for one card, oldest first
    pub fn card_logs(&self, card_id: i64) -> Result<Vec<ReviewLog>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .logs
            .iter()
            .filter(|log| log.card_id == card_id)
            .cloned()
            .collect())
    }

    /// Full review history, oldest first
    pub fn logs(&self) -> Result<Vec<ReviewLog>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.logs.clone())
    }
}
