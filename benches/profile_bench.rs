//! Benchmarks for the profiling engine.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::cast_precision_loss,
    missing_docs
)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use perfilar::{analyze, correlation_matrix, summarize, AnalysisOptions, Dataset};

fn create_dataset(rows: usize) -> Dataset {
    let xs: Vec<Option<f64>> = (0..rows)
        .map(|i| if i % 10 == 0 { None } else { Some(i as f64) })
        .collect();
    let ys: Vec<Option<f64>> = (0..rows).map(|i| Some((i as f64) * 1.5 - 7.0)).collect();
    let cats: Vec<Option<String>> = (0..rows).map(|i| Some(format!("cat_{}", i % 17))).collect();

    Dataset::from_columns(vec![
        ("x", Arc::new(Float64Array::from(xs)) as ArrayRef),
        ("y", Arc::new(Float64Array::from(ys)) as ArrayRef),
        (
            "cat",
            Arc::new(StringArray::from(
                cats.iter().map(|c| c.as_deref()).collect::<Vec<_>>(),
            )) as ArrayRef,
        ),
    ])
    .expect("Failed to create dataset")
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for size in [1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, dataset| {
            b.iter(|| summarize(black_box(dataset)).unwrap());
        });
    }

    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");

    for size in [1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, dataset| {
            b.iter(|| correlation_matrix(black_box(dataset)).unwrap());
        });
    }

    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let options = AnalysisOptions::default();

    for size in [1_000, 10_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, dataset| {
            b.iter(|| analyze(black_box(dataset), &options).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_summarize, bench_correlation, bench_full_analysis);
criterion_main!(benches);
