// src/accumulator/processor.rs

use async_trait::async_trait;

use super::types::BoxError;

/// Consumes flushed batches.
///
/// Detached flushes may overlap, so implementations must tolerate being
/// called concurrently with themselves.
#[async_trait]
pub trait Processor<T>: Send + Sync {
    async fn process(&self, batch: Vec<T>) -> Result<(), BoxError>;
}

#[async_trait]
impl<T, F, Fut> Processor<T> for F
where
    F: Fn(Vec<T>) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<(), BoxError>> + Send,
    T: Send + 'static,
{
    async fn process(&self, batch: Vec<T>) -> Result<(), BoxError> {
        self(batch).await
    }
}
