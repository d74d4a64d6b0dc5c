use thiserror::Error;

/// Error type returned by processing routines.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while accumulating or flushing batches.
#[derive(Debug, Error)]
pub enum AccumulatorError {
    /// The processing routine returned an error.
    ///
    /// Preserves the source error for debugging.
    #[error("processor failed")]
    Processor(#[source] BoxError),

    /// The accumulator was already closed.
    #[error("accumulator closed")]
    Closed,

    /// The processing routine of a detached flush panicked.
    #[error("processor panicked: {0}")]
    Panicked(String),
}

/// A detached flush that did not complete successfully.
#[derive(Debug)]
pub struct FlushFailure {
    /// Sequence number of the flush, unique per accumulator
    pub flush_id: u64,
    /// Number of items in the failed batch
    pub batch_len: usize,
    pub error: AccumulatorError,
}
