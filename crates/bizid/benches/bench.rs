use bizid::{
    BusinessType, BusinessTypeRegistry, IdGenerator, IdParser, Identifier, MonotonicClock,
    Sequencer, SystemClock, ThreadRandom, ThreadSleep, TimeSource, YieldSleep,
};
use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration. With a fixed clock this is
// exactly one millisecond's worth of counters, so no call ever waits.
const TOTAL_IDS: usize = 4096;

type Generator<T, S> = IdGenerator<T, S, ThreadRandom>;

fn generator<T: TimeSource, S: bizid::Sleeper>(time: T, sleeper: S) -> Generator<T, S> {
    IdGenerator::with_parts(
        Sequencer::new(time, sleeper),
        ThreadRandom,
        BusinessTypeRegistry::builtin(),
    )
}

/// Single-threaded generation from a fresh generator per iteration.
fn bench_generate<T, S>(c: &mut Criterion, group_name: &str, generator_fn: impl Fn() -> Generator<T, S>)
where
    T: TimeSource,
    S: bizid::Sleeper,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_fn();
                for _ in 0..TOTAL_IDS {
                    let id = generator.generate(&BusinessType::USER, 1001).unwrap();
                    black_box(id);
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// One generator shared by a growing number of threads.
fn bench_generate_contended<T, S>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> Generator<T, S>,
) where
    T: TimeSource + Send + Sync,
    S: bizid::Sleeper + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    let mut thread_counts = vec![1, 2, 4, 8, num_cpus::get()];
    thread_counts.sort_unstable();
    thread_counts.dedup();

    for thread_count in thread_counts {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements((ids_per_thread * thread_count) as u64));
        group.bench_function(
            format!("elems/{TOTAL_IDS}/threads/{thread_count}"),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let generator = Arc::new(generator_fn());
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        scope(|s| {
                            for _ in 0..thread_count {
                                let generator = Arc::clone(&generator);
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..ids_per_thread {
                                        let id = generator
                                            .generate(&BusinessType::PROJECT, 7)
                                            .unwrap();
                                        black_box(id);
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_mock_sequential(c: &mut Criterion) {
    bench_generate(c, "mock/sequential", || {
        generator(FixedMockTime { millis: 1 }, ThreadSleep)
    });
}

fn benchmark_mock_contended(c: &mut Criterion) {
    bench_generate_contended(c, "mock/contended", || {
        generator(FixedMockTime { millis: 1 }, ThreadSleep)
    });
}

/// Wall clock: exhausted milliseconds park the thread.
fn benchmark_system_sequential(c: &mut Criterion) {
    bench_generate(c, "system/sequential", || generator(SystemClock, ThreadSleep));
}

fn benchmark_system_contended(c: &mut Criterion) {
    bench_generate_contended(c, "system/contended", || {
        generator(SystemClock, ThreadSleep)
    });
}

/// Monotonic clock: exhausted milliseconds yield instead of sleeping.
fn benchmark_mono_contended(c: &mut Criterion) {
    let clock = MonotonicClock::default();
    bench_generate_contended(c, "mono/contended", || generator(clock.clone(), YieldSleep));
}

fn benchmark_parse(c: &mut Criterion) {
    let source = IdGenerator::new();
    let ids: Vec<Identifier> = (0..TOTAL_IDS)
        .map(|_| source.generate(&BusinessType::AUDIT_LOG, 0).unwrap())
        .collect();
    let texts: Vec<String> = ids.iter().map(ToString::to_string).collect();
    let parser = IdParser::default();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("identifier/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for id in &ids {
                black_box(parser.parse(black_box(id)).unwrap());
            }
        });
    });

    group.bench_function(format!("text/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for text in &texts {
                black_box(parser.parse_str(black_box(text)).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_mock_sequential,
    benchmark_mock_contended, // CAS failures under contention
    benchmark_system_sequential,
    benchmark_system_contended,
    benchmark_mono_contended,
    benchmark_parse,
);
criterion_main!(benches);
