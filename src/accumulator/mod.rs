pub mod accumulator;
pub mod config;
pub mod processor;
pub mod types;

pub use accumulator::BatchAccumulator;
pub use config::{Config, ConfigBuilder, ConfigBuilderError};
pub use processor::Processor;
pub use types::{AccumulatorError, BoxError, FlushFailure};
