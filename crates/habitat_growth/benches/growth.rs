mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use habitat_growth::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const BUDGETS: [usize; 4] = [16, 64, 147, 512];

fn growth_height_field_benches(c: &mut Criterion) {
    let terrain = common::rolling_terrain(128.0);
    let config = GrowthConfig::default();
    let mut group = c.benchmark_group("growth/height_field");

    for &budget in &BUDGETS {
        group.throughput(common::elements_throughput(budget));
        group.bench_with_input(BenchmarkId::from_parameter(budget), &budget, |b, &n| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(0xC0FFEE ^ n as u64);
                let result = run_growth(&terrain, &config, Vec3::ZERO, n, &mut rng, None)
                    .expect("seed grounds on bench terrain");
                black_box(result.colony.len());
            });
        });
    }

    group.finish();
}

fn growth_mesh_benches(c: &mut Criterion) {
    let terrain = common::rolling_terrain(24.0);
    let mesh = TriangleMesh::from_height_field(&terrain).expect("valid bench mesh");
    let config = GrowthConfig::default();
    let mut group = c.benchmark_group("growth/triangle_mesh");

    for &budget in &BUDGETS[..2] {
        group.throughput(common::elements_throughput(budget));
        group.bench_with_input(BenchmarkId::from_parameter(budget), &budget, |b, &n| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(0xBEEF ^ n as u64);
                let result = run_growth(&mesh, &config, Vec3::ZERO, n, &mut rng, None)
                    .expect("seed grounds on bench mesh");
                black_box(result.colony.len());
            });
        });
    }

    group.finish();
}

fn growth_event_overhead_benches(c: &mut Criterion) {
    let terrain = common::rolling_terrain(128.0);
    let config = GrowthConfig::default();
    let mut group = c.benchmark_group("growth/events");
    let n = DEFAULT_MAX_MODULES;
    group.throughput(common::elements_throughput(n));

    group.bench_function("no_sink", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            black_box(run_growth(&terrain, &config, Vec3::ZERO, n, &mut rng, None).ok());
        });
    });

    group.bench_function("vec_sink", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut sink = VecSink::with_capacity(n * 8);
            let sink_ref: &mut dyn EventSink = &mut sink;
            let result = run_growth(&terrain, &config, Vec3::ZERO, n, &mut rng, Some(sink_ref));
            black_box((result.ok(), sink.len()));
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = growth_height_field_benches,
              growth_mesh_benches,
              growth_event_overhead_benches
}
criterion_main!(benches);
