//! Benchmarks for detection runs and individual checkers.

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use criterion::measurement::WallTime;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use rand::prelude::*;
use smell_guard::checkers::{
    CasingChecker, CellValue, Checker, DuplicatedValueChecker, ExtremeValueChecker, Parameters,
};
use smell_guard::core::{DetectionConfiguration, Detector, InMemoryDataset, Profiler, SmellDetector};
use std::sync::Arc;

/// Creates a dataset with an integer, a float and a text column.
///
/// Around 1% of the rows carry an outlier, 2% are null and 5% hold text
/// with odd casing.
fn create_test_data(rows: usize) -> InMemoryDataset {
    let mut rng = rand::rng();

    let mut amounts = Vec::with_capacity(rows);
    let mut prices = Vec::with_capacity(rows);
    let mut labels = Vec::with_capacity(rows);

    for i in 0..rows {
        let amount = match rng.random_range(0..100) {
            0 => Some(-10_000),
            1 | 2 => None,
            _ => Some(rng.random_range(1..500i64)),
        };
        amounts.push(amount);

        let price = match rng.random_range(0..100) {
            0 => Some(1e6),
            1 | 2 => None,
            _ => Some(rng.random_range(1.0..100.0)),
        };
        prices.push(price);

        let label = match rng.random_range(0..100) {
            0..=4 => Some(format!("mIxEd Label {i}")),
            5 | 6 => None,
            _ => Some(format!("Label {}", i % 250)),
        };
        labels.push(label);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("amount", DataType::Int64, true),
        Field::new("price", DataType::Float64, true),
        Field::new("label", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(amounts)),
            Arc::new(Float64Array::from(prices)),
            Arc::new(StringArray::from(labels)),
        ],
    )
    .unwrap();
    InMemoryDataset::from_batch("bench", batch)
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");
    group.sample_size(20);
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for rows in [1_000, 10_000, 100_000] {
        let dataset = Arc::new(create_test_data(rows));
        let detector = SmellDetector::builder(dataset)
            .configuration(DetectionConfiguration::default())
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("all_smells", rows), &detector, |b, d| {
            b.iter(|| runtime.block_on(async { std::hint::black_box(d.detect().await.unwrap()) }))
        });
    }

    group.finish();
}

fn bench_profiling(c: &mut Criterion) {
    let dataset = create_test_data(1_000);
    let profiler = Profiler::new();
    let config = DetectionConfiguration::default();

    c.bench_function("profile_battery", |b| {
        b.iter(|| std::hint::black_box(profiler.profile(&dataset, &config).unwrap()))
    });
}

fn bench_checker(
    group: &mut BenchmarkGroup<'_, WallTime>,
    checker: &dyn Checker,
    values: &[CellValue],
) {
    let params = Parameters::resolve(&checker.default_parameters(), &Default::default());
    group.bench_function(checker.id().as_str(), |b| {
        b.iter(|| std::hint::black_box(checker.evaluate(values, &params).unwrap()))
    });
}

fn bench_checkers(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkers");
    let mut rng = rand::rng();
    let rows = 50_000;

    let numbers: Vec<CellValue> = (0..rows)
        .map(|_| CellValue::Integer(rng.random_range(-100..10_000)))
        .collect();
    let texts: Vec<CellValue> = (0..rows)
        .map(|i| CellValue::from(format!("Some Label {}", i % 1_000)))
        .collect();

    bench_checker(&mut group, &ExtremeValueChecker, &numbers);
    bench_checker(&mut group, &DuplicatedValueChecker, &numbers);
    bench_checker(&mut group, &CasingChecker, &texts);

    group.finish();
}

criterion_group!(benches, bench_detection, bench_profiling, bench_checkers);
criterion_main!(benches);
