pub mod queue;
pub mod sm2;
pub mod stats;

pub use queue::{due_cards, due_count, next_due_at};
pub use sm2::{Sm2Error, compute_next_review};
pub use stats::{ReviewStats, due_forecast};
