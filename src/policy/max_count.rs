use super::FullnessPolicy;

/// Flushes once a fixed number of items has been inserted.
///
/// A threshold of zero or below is accepted and flushes on every insert.
#[derive(Debug, Clone)]
pub struct MaxCountPolicy {
    max_items: i64,
    count: i64,
}

impl MaxCountPolicy {
    pub fn new(max_items: i64) -> Self {
        Self {
            max_items,
            count: 0,
        }
    }

    /// Returns the configured threshold
    #[inline]
    pub fn max_items(&self) -> i64 {
        self.max_items
    }

    /// Returns the number of items seen since the last drain
    #[inline]
    pub fn count(&self) -> i64 {
        self.count
    }
}

impl<T> FullnessPolicy<T> for MaxCountPolicy {
    fn on_put(&mut self, _item: &T) {
        self.count = self.count.saturating_add(1);
    }

    fn is_full(&self) -> bool {
        self.count >= self.max_items
    }

    fn on_drain(&mut self) {
        self.count = 0;
    }
}
