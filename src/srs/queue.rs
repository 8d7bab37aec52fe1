//! Due-card selection.
//!
//! Pure ordering over a slice of cards; which storage the cards came from is
//! none of this module's business. Selection is deterministic: soonest due
//! first, ties broken by card id, so repeated calls return a stable queue.

use chrono::{DateTime, Utc};

use crate::domain::Card;

/// Cards eligible for review at `now`, soonest due first, capped at `limit`.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>, limit: Option<usize>) -> Vec<&Card> {
  let mut due: Vec<&Card> = cards.iter().filter(|c| c.review.is_due(now)).collect();
  due.sort_by(|a, b| a.review.due_at.cmp(&b.review.due_at).then(a.id.cmp(&b.id)));
  if let Some(limit) = limit {
    due.truncate(limit);
  }
  due
}

/// Number of cards due at `now`
pub fn due_count(cards: &[Card], now: DateTime<Utc>) -> usize {
  cards.iter().filter(|c| c.review.is_due(now)).count()
}

/// Earliest upcoming review strictly after `now`, if any card is scheduled
pub fn next_due_at(cards: &[Card], now: DateTime<Utc>) -> Option<DateTime<Utc>> {
  cards
    .iter()
    .map(|c| c.review.due_at)
    .filter(|&due| due > now)
    .min()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{fixed_now, sample_card};
  use chrono::Duration;

  fn card_due_in(id: i64, days: i64) -> Card {
    let mut card = sample_card(id);
    card.review.due_at = fixed_now() + Duration::days(days);
    card
  }

  #[test]
  fn test_due_cards_filters_future() {
    let cards = vec![card_due_in(1, -1), card_due_in(2, 0), card_due_in(3, 2)];
    let due = due_cards(&cards, fixed_now(), None);
    let ids: Vec<i64> = due.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);
  }

  #[test]
  fn test_due_cards_orders_soonest_first() {
    let cards = vec![card_due_in(1, -1), card_due_in(2, -5), card_due_in(3, -3)];
    let due = due_cards(&cards, fixed_now(), None);
    let ids: Vec<i64> = due.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
  }

  #[test]
  fn test_due_cards_ties_break_by_id() {
    let cards = vec![card_due_in(9, 0), card_due_in(3, 0), card_due_in(5, 0)];
    let due = due_cards(&cards, fixed_now(), None);
    let ids: Vec<i64> = due.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 5, 9]);
  }

  #[test]
  fn test_due_cards_respects_limit() {
    let cards = vec![card_due_in(1, -3), card_due_in(2, -2), card_due_in(3, -1)];
    let due = due_cards(&cards, fixed_now(), Some(2));
    assert_eq!(due.len(), 2);
    assert_eq!(due[0].id, 1);
  }

  #[test]
  fn test_due_count() {
    let cards = vec![card_due_in(1, -1), card_due_in(2, 1), card_due_in(3, 0)];
    assert_eq!(due_count(&cards, fixed_now()), 2);
  }

  #[test]
  fn test_next_due_at_skips_overdue() {
    let cards = vec![card_due_in(1, -2), card_due_in(2, 4), card_due_in(3, 1)];
    assert_eq!(next_due_at(&cards, fixed_now()), Some(fixed_now() + Duration::days(1)));
  }

  #[test]
  fn test_next_due_at_empty() {
    assert_eq!(next_due_at(&[], fixed_now()), None);
    let overdue = vec![card_due_in(1, -1)];
    assert_eq!(next_due_at(&overdue, fixed_now()), None);
  }
}
