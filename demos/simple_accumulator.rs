//! Simple accumulator example showing batched, non-blocking writes.
//!
//! Run with: cargo run --example simple_accumulator

use async_trait::async_trait;
use batch_processor::accumulator::{BatchAccumulator, BoxError, ConfigBuilder, Processor};
use batch_processor::policy::{AnyOf, MaxAgePolicy, MaxCountPolicy};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Simple processor that prints batch information
struct PrintingProcessor;

#[async_trait]
impl Processor<u32> for PrintingProcessor {
    async fn process(&self, batch: Vec<u32>) -> Result<(), BoxError> {
        println!("Processing batch of {} items: {:?}", batch.len(), batch);
        // Simulate some work
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let config = Arc::new(
        ConfigBuilder::default()
            .name("demo")
            .max_in_flight(2usize)
            .build()?,
    );

    // Flush every 10 items, or sooner once the oldest item is 250ms old
    let policy = AnyOf::new()
        .with(MaxCountPolicy::new(10))
        .with(MaxAgePolicy::new(Duration::from_millis(250)));

    let (accumulator, mut failures) =
        BatchAccumulator::with_config(config, PrintingProcessor, policy).with_failure_channel();

    tokio::spawn(async move {
        while let Some(failure) = failures.recv().await {
            eprintln!("flush {} failed: {}", failure.flush_id, failure.error);
        }
    });

    println!("Starting accumulator...");
    println!("- Flush at 10 items or 250ms");
    println!("- At most 2 flushes in flight");
    println!("- Producing 45 items from 3 tasks\n");

    let mut producers = Vec::new();
    for producer in 0..3u32 {
        let accumulator = accumulator.clone();
        producers.push(tokio::spawn(async move {
            for i in 0..15 {
                accumulator.put(producer * 100 + i).await?;
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            Ok::<(), batch_processor::AccumulatorError>(())
        }));
    }
    for producer in producers {
        producer.await??;
    }

    accumulator.close().await?;
    accumulator.wait().await;

    println!("\nAccumulator closed, all batches processed!");
    Ok(())
}
