//! Criterion benchmarks for launchcast_core
//!
//! Run with: cargo bench -p launchcast_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use launchcast_core::model::{RampShape, ScenarioAssumptions};
use launchcast_core::{ScenarioBuilder, compute, export, ramp_factors};

fn bench_ramp_factors(c: &mut Criterion) {
    let mut group = c.benchmark_group("ramp_factors");
    for years in [3u32, 5, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, &years| {
            b.iter(|| ramp_factors(black_box(years), black_box(RampShape::Fast)))
        });
    }
    group.finish();
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    for shape in RampShape::ALL {
        let assumptions = ScenarioBuilder::new()
            .ramp_years(8)
            .ramp_shape(shape)
            .build()
            .expect("valid assumptions");
        group.bench_with_input(
            BenchmarkId::from_parameter(shape.as_str()),
            &assumptions,
            |b, a| b.iter(|| compute(black_box(a))),
        );
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let record = compute(&ScenarioAssumptions::default()).expect("default scenario");
    c.bench_function("to_csv", |b| b.iter(|| export::to_csv(black_box(&record))));
}

criterion_group!(benches, bench_ramp_factors, bench_compute, bench_export);
criterion_main!(benches);
