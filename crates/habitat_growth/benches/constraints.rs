mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use habitat_growth::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn grown_colony(terrain: &HeightField, config: &GrowthConfig, budget: usize) -> Colony {
    let mut rng = StdRng::seed_from_u64(0xA11CE);
    run_growth(terrain, config, Vec3::ZERO, budget, &mut rng, None)
        .expect("seed grounds on bench terrain")
        .colony
}

fn constraint_evaluation_benches(c: &mut Criterion) {
    let terrain = common::rolling_terrain(128.0);
    let config = GrowthConfig::default();
    let directions = DirectionSet::from_config(&config);
    let mut group = c.benchmark_group("constraints/evaluate_offsets");

    for &budget in &[8usize, 64, 256, 1024] {
        let colony = grown_colony(&terrain, &config, budget);
        let cursor = colony.modules()[colony.len() / 2].position;
        let evaluator = ConstraintEvaluator::new(&config, &terrain);
        group.throughput(common::elements_throughput(directions.len()));

        group.bench_with_input(
            BenchmarkId::from_parameter(colony.len()),
            &colony,
            |b, colony| {
                b.iter(|| {
                    let accepted = directions
                        .iter()
                        .enumerate()
                        .filter_map(|(i, d)| evaluator.evaluate_offset(cursor, i, d, colony).ok())
                        .count();
                    black_box(accepted);
                });
            },
        );
    }

    group.finish();
}

fn selection_benches(c: &mut Criterion) {
    let config = GrowthConfig::default();
    let mut group = c.benchmark_group("selection/most_sun_aligned");

    for &n in &[6usize, 12, 64, 256] {
        let candidates = DirectionSet::new(n, config.step_size());
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let sel = pick_most_sun_aligned(
                    candidates.iter(),
                    Vec3::ZERO,
                    config.sun_vector(),
                );
                black_box(sel);
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = constraint_evaluation_benches, selection_benches
}
criterion_main!(benches);
