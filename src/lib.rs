//! # batch-processor
//!
//! Collects items from any number of concurrent producers and hands them to a
//! processing routine in batches, built on Tokio.
//!
//! ## Features
//!
//! - **Pluggable fullness policies** deciding when a batch is flushed
//! - **Non-blocking producers**: flushes run on their own tasks
//! - **Optional cap** on concurrently running flushes
//! - **Explicit close** that processes the remainder on the caller's task
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use batch_processor::accumulator::{BatchAccumulator, BoxError};
//! use batch_processor::policy::MaxCountPolicy;
//!
//! let accumulator = BatchAccumulator::new(
//!     |batch: Vec<u64>| async move {
//!         println!("storing {} rows", batch.len());
//!         Ok::<(), BoxError>(())
//!     },
//!     MaxCountPolicy::new(100),
//! );
//!
//! for id in 0..250 {
//!     accumulator.put(id).await?;
//! }
//! // Two batches of 100 were dispatched; the last 50 are processed here
//! accumulator.close().await?;
//! accumulator.wait().await;
//! ```
//!
//! ## Modules
//!
//! - [`accumulator`] - Thread-safe buffer and flush dispatch
//! - [`policy`] - Fullness policies deciding when to flush

pub mod accumulator;
pub mod policy;

pub use accumulator::{AccumulatorError, BatchAccumulator, Config, ConfigBuilder, Processor};
pub use policy::{FullnessPolicy, MaxCountPolicy};
