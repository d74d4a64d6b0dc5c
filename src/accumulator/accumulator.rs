use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, Semaphore, mpsc};
use tokio_util::task::TaskTracker;
use tracing::{Instrument, debug, error, info_span, warn};

use super::config::Config;
use super::processor::Processor;
use super::types::{AccumulatorError, FlushFailure};
use crate::policy::FullnessPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Closed,
}

struct Inner<T, P> {
    state: State,
    buffer: Vec<T>,
    policy: P,
}

impl<T, P> Inner<T, P>
where
    P: FullnessPolicy<T>,
{
    fn ensure_open(&self) -> Result<(), AccumulatorError> {
        match self.state {
            State::Open => Ok(()),
            State::Closed => Err(AccumulatorError::Closed),
        }
    }

    /// Appends the item and returns the captured batch if the policy reports full.
    fn put(&mut self, item: T) -> Result<Option<Vec<T>>, AccumulatorError> {
        self.ensure_open()?;

        self.policy.on_put(&item);
        self.buffer.push(item);

        if self.policy.is_full() {
            Ok(Some(self.drain()))
        } else {
            Ok(None)
        }
    }

    fn drain(&mut self) -> Vec<T> {
        let batch = std::mem::take(&mut self.buffer);
        self.policy.on_drain();
        batch
    }

    fn close(&mut self) -> Result<Vec<T>, AccumulatorError> {
        self.ensure_open()?;
        self.state = State::Closed;
        Ok(self.drain())
    }
}

impl<T, P> Drop for Inner<T, P> {
    fn drop(&mut self) {
        if self.state == State::Open && !self.buffer.is_empty() {
            warn!(
                pending = self.buffer.len(),
                "accumulator dropped without close, pending items discarded"
            );
        }
    }
}

/// Collects items and hands them to a [`Processor`] in batches.
///
/// Every `put` consults the [`FullnessPolicy`]; when it reports full the whole
/// buffer is captured and processed on a separate tokio task, so producers
/// never wait for the processor. [`close`](Self::close) flushes whatever is
/// left on the caller's task and returns the processor's result.
///
/// Clones share the same buffer, policy and state.
pub struct BatchAccumulator<T, P> {
    config: Arc<Config>,
    inner: Arc<Mutex<Inner<T, P>>>,
    processor: Arc<dyn Processor<T>>,
    permits: Option<Arc<Semaphore>>,
    tracker: TaskTracker,
    next_flush_id: Arc<AtomicU64>,
    failures: Option<mpsc::UnboundedSender<FlushFailure>>,
}

impl<T, P> Clone for BatchAccumulator<T, P> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            inner: self.inner.clone(),
            processor: self.processor.clone(),
            permits: self.permits.clone(),
            tracker: self.tracker.clone(),
            next_flush_id: self.next_flush_id.clone(),
            failures: self.failures.clone(),
        }
    }
}

impl<T, P> BatchAccumulator<T, P>
where
    T: Send + 'static,
    P: FullnessPolicy<T>,
{
    /// Creates an accumulator with the default [`Config`].
    pub fn new<R>(processor: R, policy: P) -> Self
    where
        R: Processor<T> + 'static,
    {
        Self::with_config(Arc::new(Config::default()), processor, policy)
    }

    pub fn with_config<R>(config: Arc<Config>, processor: R, policy: P) -> Self
    where
        R: Processor<T> + 'static,
    {
        let permits = config
            .max_in_flight
            .map(|limit| Arc::new(Semaphore::new(limit)));

        Self {
            config,
            inner: Arc::new(Mutex::new(Inner {
                state: State::Open,
                buffer: Vec::new(),
                policy,
            })),
            processor: Arc::new(processor),
            permits,
            tracker: TaskTracker::new(),
            next_flush_id: Arc::new(AtomicU64::new(0)),
            failures: None,
        }
    }

    /// Routes failures of detached flushes to the returned receiver.
    ///
    /// Call before cloning; existing clones keep reporting to logs only.
    pub fn with_failure_channel(mut self) -> (Self, mpsc::UnboundedReceiver<FlushFailure>) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.failures = Some(tx);
        (self, rx)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Adds an item, dispatching a flush if the policy reports full.
    ///
    /// Returns once the item is buffered; a triggered flush runs on its own task.
    pub async fn put(&self, item: T) -> Result<(), AccumulatorError> {
        let mut inner = self.inner.lock().await;
        // Spawn before releasing the lock so close() cannot seal the tracker in between
        if let Some(batch) = inner.put(item)? {
            self.dispatch(batch);
        }
        Ok(())
    }

    /// Flushes the buffered items now without closing.
    ///
    /// Returns the number of items dispatched; an empty buffer dispatches nothing.
    pub async fn flush(&self) -> Result<usize, AccumulatorError> {
        let mut inner = self.inner.lock().await;
        inner.ensure_open()?;
        let batch = inner.drain();

        let len = batch.len();
        if len > 0 {
            self.dispatch(batch);
        }
        Ok(len)
    }

    /// Closes the accumulator and processes the remaining items on the calling task.
    ///
    /// Flushes dispatched earlier keep running; use [`wait`](Self::wait) to
    /// await them. A processor error is returned to the caller.
    pub async fn close(&self) -> Result<(), AccumulatorError> {
        let batch = {
            let mut inner = self.inner.lock().await;
            let batch = inner.close()?;
            self.tracker.close();
            batch
        };

        debug!(
            accumulator = %self.config.name,
            remaining = batch.len(),
            "closing accumulator"
        );

        if batch.is_empty() {
            return Ok(());
        }
        self.processor
            .process(batch)
            .await
            .map_err(AccumulatorError::Processor)
    }

    /// Waits until the accumulator is closed and every detached flush has finished.
    pub async fn wait(&self) {
        self.tracker.wait().await;
    }

    /// Number of detached flushes that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Number of items waiting in the buffer.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.buffer.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.state == State::Closed
    }

    fn dispatch(&self, batch: Vec<T>) {
        let flush_id = self.next_flush_id.fetch_add(1, Ordering::Relaxed);
        let batch_len = batch.len();
        let processor = self.processor.clone();
        let permits = self.permits.clone();
        let failures = self.failures.clone();

        debug!(
            accumulator = %self.config.name,
            flush_id,
            batch_len,
            "dispatching flush"
        );

        let span = info_span!("flush", accumulator = %self.config.name, flush_id);
        self.tracker.spawn(
            async move {
                // Only a closed semaphore refuses a permit; this one is never closed.
                let _permit = match permits {
                    Some(permits) => permits.acquire_owned().await.ok(),
                    None => None,
                };

                let result = AssertUnwindSafe(processor.process(batch))
                    .catch_unwind()
                    .await;

                let error = match result {
                    Ok(Ok(())) => return,
                    Ok(Err(e)) => AccumulatorError::Processor(e),
                    Err(panic) => AccumulatorError::Panicked(panic_message(panic)),
                };

                error!(batch_len, error = %error, "flush failed");
                if let Some(failures) = failures {
                    let _ = failures.send(FlushFailure {
                        flush_id,
                        batch_len,
                        error,
                    });
                }
            }
            .instrument(span),
        );
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
