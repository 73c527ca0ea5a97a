//! Criterion benchmarks for the matching engine.
//!
//! ```bash
//! cargo bench
//! cargo bench -- matched_pair
//! ```
//!
//! Results land in `target/criterion/` with HTML reports.

use std::time::Duration;

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lobcore::{Match, MatchSink, MatchingEngine, Order, Side, SystemClock};

/// 100.00 in fixed-point.
const BASE_PRICE: u64 = 10_000_000_000;

/// One price tick: 0.01.
const TICK: u64 = 1_000_000;

/// Sink that drops every event, so benchmarks measure the engine alone.
struct DiscardSink;

impl MatchSink for DiscardSink {
    fn on_match(&mut self, _event: &Match) {}
}

type BenchEngine = MatchingEngine<SystemClock, DiscardSink>;

fn bench_engine(capacity: usize) -> BenchEngine {
    MatchingEngine::with_parts(capacity, SystemClock, DiscardSink)
}

/// Seed `count` resting asks starting at `base_price`, one tick apart.
fn populate_asks(engine: &mut BenchEngine, count: usize, first_id: u64, quantity: u64) {
    for i in 0..count {
        let order = Order::new(
            first_id + i as u64,
            Side::Sell,
            BASE_PRICE + i as u64 * TICK,
            quantity,
            0,
        );
        engine.add(order).expect("populate ask");
    }
}

/// Seed `count` resting bids below the ask range, one tick apart.
fn populate_bids(engine: &mut BenchEngine, count: usize, first_id: u64, quantity: u64) {
    for i in 0..count {
        let order = Order::new(
            first_id + i as u64,
            Side::Buy,
            BASE_PRICE - TICK - i as u64 * TICK,
            quantity,
            0,
        );
        engine.add(order).expect("populate bid");
    }
}

/// Deterministic mixed flow for throughput runs.
fn generate_order_batch(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let is_buy = rng.gen_bool(0.5);
            let ticks: i64 = rng.gen_range(-100..=100);
            let price = (BASE_PRICE as i64 + ticks * TICK as i64) as u64;
            Order::new(
                (i + 1) as u64,
                if is_buy { Side::Buy } else { Side::Sell },
                price,
                rng.gen_range(1..=100),
                (i + 1) as u64,
            )
        })
        .collect()
}

// ============================================================================
// BENCHMARK: single match latency
// ============================================================================

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");
    group.measurement_time(Duration::from_secs(10));

    // Steady state: each iteration adds an ask and a buy that fills it
    // exactly, leaving the book unchanged between iterations.
    group.bench_function("matched_pair", |b| {
        let mut engine = bench_engine(2_000);
        populate_asks(&mut engine, 1_000, 1, 100);
        let mut next_id = 1_000_000u64;

        b.iter(|| {
            next_id += 2;
            let ask = Order::new(next_id, Side::Sell, BASE_PRICE - TICK, 100, 0);
            let buy = Order::new(next_id + 1, Side::Buy, BASE_PRICE - TICK, 100, 0);
            engine.add(ask).expect("ask admits");
            black_box(engine.add(buy)).expect("buy admits and fills");
        });
    });

    // A buy large enough to sweep ten price levels.
    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || {
                let mut engine = bench_engine(200);
                populate_asks(&mut engine, 100, 1, 10);
                engine
            },
            |mut engine| {
                let buy = Order::new(999, Side::Buy, BASE_PRICE + 9 * TICK, 100, 0);
                black_box(engine.add(buy)).expect("sweep admits");
                engine
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: order operations
// ============================================================================

fn bench_order_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_operations");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("add_rest_on_1k_book", |b| {
        b.iter_batched(
            || {
                let mut engine = bench_engine(2_000);
                populate_asks(&mut engine, 500, 1, 100);
                populate_bids(&mut engine, 500, 1_000, 100);
                engine
            },
            |mut engine| {
                // Deep inside the bid side: no match, fresh level.
                let order = Order::new(999_999, Side::Buy, BASE_PRICE / 2, 100, 0);
                black_box(engine.add(order)).expect("resting add");
                engine
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_mid_book", |b| {
        b.iter_batched(
            || {
                let mut engine = bench_engine(2_000);
                populate_bids(&mut engine, 1_000, 1, 100);
                engine
            },
            |mut engine| {
                black_box(engine.cancel(500));
                engine
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("snapshot_depth_50", |b| {
        let mut engine = bench_engine(4_000);
        populate_asks(&mut engine, 1_000, 1, 100);
        populate_bids(&mut engine, 1_000, 2_000, 100);

        b.iter(|| black_box(engine.snapshot(50)));
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(
            BenchmarkId::new("orders", batch_size),
            &batch_size,
            |b, &size| {
                let orders = generate_order_batch(size, 42);

                b.iter_batched(
                    || (bench_engine(size), orders.clone()),
                    |(mut engine, orders)| {
                        for order in orders {
                            engine.add(order).expect("unique ids within capacity");
                        }
                        engine.book().order_count()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_match,
    bench_order_operations,
    bench_throughput
);
criterion_main!(benches);
