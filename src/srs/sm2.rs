//! SM-2 interval scheduling.
//!
//! `compute_next_review` is the scheduler's single transition: recall quality
//! plus the card's current `ReviewState` in, the next state out. It is
//! deterministic and side-effect free; the review instant is an explicit
//! parameter so callers (and tests) control the clock.

use chrono::{DateTime, Duration, Utc};

use crate::config::{FIRST_INTERVAL_DAYS, MIN_EASE_FACTOR, SECOND_INTERVAL_DAYS};
use crate::domain::ReviewState;

/// Highest accepted recall quality
pub const MAX_QUALITY: u8 = 5;

/// Qualities below this value count as a failed review
pub const PASS_THRESHOLD: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sm2Error {
  /// Quality grade outside the accepted 0-5 range
  InvalidQuality(u8),
}

impl std::fmt::Display for Sm2Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::InvalidQuality(q) => write!(f, "invalid review quality {} (expected 0-5)", q),
    }
  }
}

impl std::error::Error for Sm2Error {}

/// Compute the next scheduling state after one review.
///
/// `quality` grades the recall from 0 (no recall) to 5 (effortless). Below 3
/// the review counts as failed: repetitions reset and the card comes back
/// tomorrow. The input state is never touched; the caller persists the
/// returned one, serializing concurrent reviews of the same card.
pub fn compute_next_review(
  quality: u8,
  state: &ReviewState,
  now: DateTime<Utc>,
) -> Result<ReviewState, Sm2Error> {
  if quality > MAX_QUALITY {
    return Err(Sm2Error::InvalidQuality(quality));
  }

  let (interval_days, repetitions) = if quality < PASS_THRESHOLD {
    // Failed review: progress resets, card reappears tomorrow
    (FIRST_INTERVAL_DAYS, 0)
  } else {
    // The growing interval scales the previous one by the ease factor as it
    // stood BEFORE this review. Rounding is half-away-from-zero (f64::round);
    // changing either choice would shift long-run schedules for existing cards.
    // Growth is uncapped; once the product outgrows i64 the `as` cast
    // saturates at i64::MAX days and the interval stays pinned there.
    let interval = match state.repetitions {
      0 => FIRST_INTERVAL_DAYS,
      1 => SECOND_INTERVAL_DAYS,
      _ => ((state.interval_days as f64) * state.ease_factor).round() as i64,
    };
    (interval, state.repetitions + 1)
  };

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3.
  // Runs on the failed branch too: a failure keeps dragging ease down.
  let q = quality as f64;
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let ease_factor = (state.ease_factor + ease_delta).max(MIN_EASE_FACTOR);

  // Intervals on well-practiced cards can exceed what a DateTime holds; the
  // interval stays uncapped while the due instant saturates at the latest
  // representable one instead of overflowing.
  let due_at = Duration::try_days(interval_days)
    .and_then(|delta| now.checked_add_signed(delta))
    .unwrap_or(DateTime::<Utc>::MAX_UTC);

  Ok(ReviewState {
    ease_factor,
    interval_days,
    repetitions,
    due_at,
  })
}
