use std::time::Duration;
use tokio::time::Instant;

use super::FullnessPolicy;

/// Flushes once the oldest pending item has waited at least `max_age`.
///
/// The age is only checked when an item is inserted; a quiet accumulator
/// holds its items until the next `put` or `close`.
#[derive(Debug, Clone)]
pub struct MaxAgePolicy {
    max_age: Duration,
    oldest: Option<Instant>,
}

impl MaxAgePolicy {
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            oldest: None,
        }
    }

    #[inline]
    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

impl<T> FullnessPolicy<T> for MaxAgePolicy {
    fn on_put(&mut self, _item: &T) {
        self.oldest.get_or_insert_with(Instant::now);
    }

    fn is_full(&self) -> bool {
        self.oldest
            .map(|oldest| oldest.elapsed() >= self.max_age)
            .unwrap_or(false)
    }

    fn on_drain(&mut self) {
        self.oldest = None;
    }
}
