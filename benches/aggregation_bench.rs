use chrono::TimeDelta;
use criterion::{Criterion, criterion_group, criterion_main};
use rust_decimal::Decimal;
use std::hint::black_box;
use timeline_rs::core::primitives::year_start;
use timeline_rs::core::{Granularity, MainCategory, Transaction, ViewportRange, aggregate};
use timeline_rs::interaction::{DEFAULT_MIN_THUMB_WIDTH_FRACTION, thumb_geometry};
use timeline_rs::{TimelineEngine, TimelineEngineConfig};

fn generated_transactions(count: i64) -> Vec<Transaction> {
    let base = year_start(2015).expect("base year");
    (0..count)
        .map(|i| {
            let (category, leaf) = match i % 3 {
                0 => (MainCategory::Income, "Salary"),
                1 => (MainCategory::Expenses, "Groceries"),
                _ => (MainCategory::Transfers, "Savings"),
            };
            Transaction::new(
                base + TimeDelta::hours(i * 7),
                Decimal::new(1_250 + i % 977, 2),
                category,
                Some(leaf),
            )
        })
        .collect()
}

fn bench_aggregate_10k(c: &mut Criterion) {
    let transactions = generated_transactions(10_000);

    for granularity in [Granularity::Year, Granularity::Quarter, Granularity::Month] {
        c.bench_function(&format!("aggregate_10k_{granularity:?}"), |b| {
            b.iter(|| {
                let _ = aggregate(black_box(&transactions), black_box(granularity));
            })
        });
    }
}

fn bench_thumb_geometry(c: &mut Criterion) {
    let full = ViewportRange::new(
        year_start(2015).expect("start"),
        year_start(2030).expect("end"),
    )
    .expect("full range");
    let visible = ViewportRange::new(
        year_start(2022).expect("start"),
        year_start(2024).expect("end"),
    )
    .expect("visible range");

    c.bench_function("thumb_geometry", |b| {
        b.iter(|| {
            let _ = thumb_geometry(
                black_box(full),
                black_box(visible),
                black_box(DEFAULT_MIN_THUMB_WIDTH_FRACTION),
            );
        })
    });
}

fn bench_engine_snapshot_json_2k(c: &mut Criterion) {
    let config = TimelineEngineConfig::default().with_reference_year(2025);
    let mut engine = TimelineEngine::new(config).expect("engine init");
    engine.set_transactions(generated_transactions(2_000));
    let _ = engine.zoom_in();

    c.bench_function("engine_snapshot_json_2k", |b| {
        b.iter(|| {
            let _ = engine
                .snapshot_json_pretty()
                .expect("snapshot json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate_10k,
    bench_thumb_geometry,
    bench_engine_snapshot_json_2k
);
criterion_main!(benches);
