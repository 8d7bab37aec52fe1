//! Review statistics and scheduling forecast.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Card, ReviewLog};

/// Aggregate counters over a review history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
  pub total_reviews: i64,
  pub correct_reviews: i64,
}

impl ReviewStats {
  pub fn from_logs(logs: &[ReviewLog]) -> Self {
    let total_reviews = logs.len() as i64;
    let correct_reviews = logs.iter().filter(|log| log.was_correct).count() as i64;
    Self {
      total_reviews,
      correct_reviews,
    }
  }

  pub fn success_rate(&self) -> f64 {
    if self.total_reviews > 0 {
      self.correct_reviews as f64 / self.total_reviews as f64
    } else {
      0.0
    }
  }
}

/// Cards becoming due on each of the next `days` days.
///
/// Bucket 0 counts cards already due or due within 24h of `now`; bucket `d`
/// covers the 24h window starting `d` days out. Cards beyond the horizon are
/// not counted.
pub fn due_forecast(cards: &[Card], now: DateTime<Utc>, days: usize) -> Vec<usize> {
  let mut buckets = vec![0usize; days];
  for card in cards {
    let offset = card.review.due_at - now;
    let day = if offset <= Duration::zero() {
      0
    } else {
      offset.num_days() as usize
    };
    if day < days {
      buckets[day] += 1;
    }
  }
  buckets
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{fixed_now, sample_card};

  #[test]
  fn test_stats_from_logs() {
    let logs = vec![
      ReviewLog::new(1, 5, fixed_now(), true, 1),
      ReviewLog::new(1, 2, fixed_now(), false, 1),
      ReviewLog::new(2, 4, fixed_now(), true, 6),
      ReviewLog::new(2, 3, fixed_now(), true, 16),
    ];
    let stats = ReviewStats::from_logs(&logs);
    assert_eq!(stats.total_reviews, 4);
    assert_eq!(stats.correct_reviews, 3);
    assert!((stats.success_rate() - 0.75).abs() < 1e-9);
  }

  #[test]
  fn test_stats_empty_history() {
    let stats = ReviewStats::from_logs(&[]);
    assert_eq!(stats, ReviewStats::default());
    assert_eq!(stats.success_rate(), 0.0);
  }

  #[test]
  fn test_forecast_buckets() {
    let mut overdue = sample_card(1);
    overdue.review.due_at = fixed_now() - Duration::days(2);
    let mut today = sample_card(2);
    today.review.due_at = fixed_now() + Duration::hours(3);
    let mut in_two_days = sample_card(3);
    in_two_days.review.due_at = fixed_now() + Duration::days(2) + Duration::hours(1);
    let mut far_out = sample_card(4);
    far_out.review.due_at = fixed_now() + Duration::days(30);

    let cards = vec![overdue, today, in_two_days, far_out];
    let forecast = due_forecast(&cards, fixed_now(), 7);
    assert_eq!(forecast, vec![2, 0, 1, 0, 0, 0, 0]);
  }

  #[test]
  fn test_forecast_empty_horizon() {
    let forecast = due_forecast(&[sample_card(1)], fixed_now(), 0);
    assert!(forecast.is_empty());
  }
}
