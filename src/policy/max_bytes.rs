use std::fmt;

use super::FullnessPolicy;

/// Flushes once the accumulated weight of the pending items reaches `max_bytes`.
///
/// Each item is weighed once, on insert, by the supplied function.
pub struct MaxBytesPolicy<F> {
    max_bytes: usize,
    bytes: usize,
    weigh: F,
}

impl<F> MaxBytesPolicy<F> {
    pub fn new(max_bytes: usize, weigh: F) -> Self {
        Self {
            max_bytes,
            bytes: 0,
            weigh,
        }
    }

    /// Returns the weight accumulated since the last drain
    #[inline]
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl<F> fmt::Debug for MaxBytesPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaxBytesPolicy")
            .field("max_bytes", &self.max_bytes)
            .field("bytes", &self.bytes)
            .finish()
    }
}

impl<T, F> FullnessPolicy<T> for MaxBytesPolicy<F>
where
    F: Fn(&T) -> usize + Send,
{
    fn on_put(&mut self, item: &T) {
        self.bytes = self.bytes.saturating_add((self.weigh)(item));
    }

    fn is_full(&self) -> bool {
        self.bytes >= self.max_bytes
    }

    fn on_drain(&mut self) {
        self.bytes = 0;
    }
}
