//! Fullness policies decide when a [`BatchAccumulator`](crate::accumulator::BatchAccumulator)
//! should flush.
//!
//! A policy sees three lifecycle events, always while the accumulator's lock
//! is held, so implementations never need their own synchronization:
//!
//! 1. [`on_put`](FullnessPolicy::on_put) once per inserted item
//! 2. [`is_full`](FullnessPolicy::is_full) right after every `on_put`
//! 3. [`on_drain`](FullnessPolicy::on_drain) once per flush, after the buffer was captured

mod composite;
mod max_age;
mod max_bytes;
mod max_count;

pub use composite::{AllOf, AnyOf};
pub use max_age::MaxAgePolicy;
pub use max_bytes::MaxBytesPolicy;
pub use max_count::MaxCountPolicy;

/// Decides when an accumulated batch is ready to be flushed.
///
/// # Type Parameters
///
/// * `T` - Type of the items being accumulated
pub trait FullnessPolicy<T>: Send {
    /// Observes an item that is about to be appended to the buffer.
    fn on_put(&mut self, item: &T);

    /// Returns `true` if the accumulator should flush now.
    fn is_full(&self) -> bool;

    /// Resets state after the buffer has been drained.
    fn on_drain(&mut self);
}

impl<T, P> FullnessPolicy<T> for Box<P>
where
    P: FullnessPolicy<T> + ?Sized,
{
    fn on_put(&mut self, item: &T) {
        (**self).on_put(item)
    }

    fn is_full(&self) -> bool {
        (**self).is_full()
    }

    fn on_drain(&mut self) {
        (**self).on_drain()
    }
}
