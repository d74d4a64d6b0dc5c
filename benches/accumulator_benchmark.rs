use async_trait::async_trait;
use batch_processor::accumulator::{BatchAccumulator, BoxError, ConfigBuilder, Processor};
use batch_processor::policy::{AnyOf, MaxBytesPolicy, MaxCountPolicy};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Simulates a sink with a small fixed cost per batch
struct SimulatedSink {
    processed: Arc<AtomicUsize>,
}

#[async_trait]
impl Processor<Vec<u8>> for SimulatedSink {
    async fn process(&self, batch: Vec<Vec<u8>>) -> Result<(), BoxError> {
        tokio::time::sleep(Duration::from_micros(50)).await;
        self.processed.fetch_add(batch.len(), Ordering::Relaxed);
        Ok(())
    }
}

fn generate_payloads(count: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let len = rng.gen_range(16..512);
            (0..len).map(|_| rng.gen()).collect()
        })
        .collect()
}

fn bench_batch_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulator_batch_sizes");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let data_size = 10_000;
    let payloads = generate_payloads(data_size);

    for batch_size in [10i64, 100, 1000] {
        group.throughput(Throughput::Elements(data_size as u64));
        group.bench_with_input(
            BenchmarkId::new("batch_size", batch_size),
            &batch_size,
            |b, &batch_size| {
                b.to_async(&runtime).iter(|| {
                    let payloads = payloads.clone();
                    async move {
                        let processed = Arc::new(AtomicUsize::new(0));
                        let sink = SimulatedSink {
                            processed: processed.clone(),
                        };
                        let accumulator =
                            BatchAccumulator::new(sink, MaxCountPolicy::new(batch_size));

                        for payload in payloads {
                            accumulator.put(payload).await.unwrap();
                        }
                        accumulator.close().await.unwrap();
                        accumulator.wait().await;
                        assert_eq!(processed.load(Ordering::Relaxed), data_size);
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_in_flight_caps(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulator_in_flight_caps");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let data_size = 10_000;
    let payloads = generate_payloads(data_size);

    for cap in [1usize, 4, 16] {
        group.throughput(Throughput::Elements(data_size as u64));
        group.bench_with_input(BenchmarkId::new("max_in_flight", cap), &cap, |b, &cap| {
            b.to_async(&runtime).iter(|| {
                let payloads = payloads.clone();
                async move {
                    let config = Arc::new(
                        ConfigBuilder::default()
                            .name("bench")
                            .max_in_flight(cap)
                            .build()
                            .unwrap(),
                    );
                    let processed = Arc::new(AtomicUsize::new(0));
                    let sink = SimulatedSink {
                        processed: processed.clone(),
                    };
                    let policy = AnyOf::new()
                        .with(MaxCountPolicy::new(100))
                        .with(MaxBytesPolicy::new(16 * 1024, |p: &Vec<u8>| p.len()));
                    let accumulator = BatchAccumulator::with_config(config, sink, policy);

                    for payload in payloads {
                        accumulator.put(payload).await.unwrap();
                    }
                    accumulator.close().await.unwrap();
                    accumulator.wait().await;
                }
            });
        });
    }
    group.finish();
}

fn bench_concurrent_producers(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulator_concurrent_producers");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let per_producer = 2_000;
    for producers in [1usize, 4, 8] {
        let payloads = generate_payloads(per_producer);
        group.throughput(Throughput::Elements((producers * per_producer) as u64));
        group.bench_with_input(
            BenchmarkId::new("producers", producers),
            &producers,
            |b, &producers| {
                b.to_async(&runtime).iter(|| {
                    let payloads = payloads.clone();
                    async move {
                        let processed = Arc::new(AtomicUsize::new(0));
                        let sink = SimulatedSink {
                            processed: processed.clone(),
                        };
                        let accumulator = BatchAccumulator::new(sink, MaxCountPolicy::new(256));

                        let mut handles = Vec::with_capacity(producers);
                        for _ in 0..producers {
                            let accumulator = accumulator.clone();
                            let payloads = payloads.clone();
                            handles.push(tokio::spawn(async move {
                                for payload in payloads {
                                    accumulator.put(payload).await.unwrap();
                                }
                            }));
                        }
                        for handle in handles {
                            handle.await.unwrap();
                        }

                        accumulator.close().await.unwrap();
                        accumulator.wait().await;
                        assert_eq!(processed.load(Ordering::Relaxed), producers * per_producer);
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_batch_sizes,
    bench_in_flight_caps,
    bench_concurrent_producers
);
criterion_main!(benches);
