use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::INITIAL_EASE_FACTOR;

/// Per-card scheduling record, owned 1:1 by its card.
///
/// Rewritten once per review by `srs::sm2::compute_next_review`, which takes a
/// snapshot and returns a fresh state; persisting the result is the caller's
/// job. The record is destroyed together with its owning card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
  /// Multiplier controlling how fast the interval grows; never below 1.3
  pub ease_factor: f64,
  /// Days until the next review; 0 only before the first review
  pub interval_days: i64,
  /// Consecutive successful reviews since the last failure
  pub repetitions: i64,
  /// Instant the card becomes eligible for review again
  pub due_at: DateTime<Utc>,
}

impl ReviewState {
  /// Default state for a brand-new card: due immediately, ease 2.5.
  pub fn new(created_at: DateTime<Utc>) -> Self {
    Self {
      ease_factor: INITIAL_EASE_FACTOR,
      interval_days: 0,
      repetitions: 0,
      due_at: created_at,
    }
  }

  /// True once the card's due instant has been reached
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.due_at <= now
  }

  /// True until the card has been reviewed at least once
  pub fn is_new(&self) -> bool {
    self.repetitions == 0 && self.interval_days == 0
  }
}

/// Self-reported recall grade for one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewQuality {
  Blackout = 0,
  VeryHard = 1,
  Hard = 2,
  Normal = 3,
  Easy = 4,
  VeryEasy = 5,
}

impl ReviewQuality {
  pub fn from_u8(value: u8) -> Option<Self> {
    match value {
      0 => Some(Self::Blackout),
      1 => Some(Self::VeryHard),
      2 => Some(Self::Hard),
      3 => Some(Self::Normal),
      4 => Some(Self::Easy),
      5 => Some(Self::VeryEasy),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Blackout => "blackout",
      Self::VeryHard => "very_hard",
      Self::Hard => "hard",
      Self::Normal => "normal",
      Self::Easy => "easy",
      Self::VeryEasy => "very_easy",
    }
  }

  /// Grades 3-5 count as a successful recall; 0-2 reset the card
  pub fn is_passing(&self) -> bool {
    matches!(self, Self::Normal | Self::Easy | Self::VeryEasy)
  }
}

/// One entry in a card's append-only review history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLog {
  pub card_id: i64,
  pub quality: u8,
  pub reviewed_at: DateTime<Utc>,
  pub was_correct: bool,
  /// Interval assigned by this review, in days
  pub interval_days: i64,
}

impl ReviewLog {
  pub fn new(
    card_id: i64,
    quality: u8,
    reviewed_at: DateTime<Utc>,
    was_correct: bool,
    interval_days: i64,
  ) -> Self {
    Self {
      card_id,
      quality,
      reviewed_at,
      was_correct,
      interval_days,
    }
  }
}
