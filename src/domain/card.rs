use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::review::ReviewState;

/// A named collection of cards studied together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
  pub id: i64,
  pub title: String,
  pub description: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
  pub id: i64,
  pub deck_id: i64,
  pub question: String,
  pub answer: String,
  /// Scheduling state, owned 1:1 by this card
  pub review: ReviewState,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Card {
  /// A new card is due immediately; the store assigns the real id on insert.
  pub fn new(deck_id: i64, question: String, answer: String, created_at: DateTime<Utc>) -> Self {
    Self {
      id: 0,
      deck_id,
      question,
      answer,
      review: ReviewState::new(created_at),
      created_at,
      updated_at: created_at,
    }
  }
}
