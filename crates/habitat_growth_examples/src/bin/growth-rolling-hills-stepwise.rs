use glam::{Vec2, Vec3};
use habitat_growth::prelude::*;
use habitat_growth_examples::{init_tracing, render_colony_to_png, rolling_hills, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Drive the simulation one iteration at a time and stop early once the
    // colony has spent a long streak blocked.
    let terrain = rolling_hills(96.0)?;
    let config = GrowthConfig::builder()
        .with_min_dist(2.5)
        .with_step_size(3.0)
        .with_direction_count(8)
        .build()?;

    let mut sinks = MultiSink::with_sinks(vec![
        VecSink::only([GrowthEventKind::ModulePlaced]),
        VecSink::only([GrowthEventKind::Blocked]),
    ]);
    let mut rng = StdRng::seed_from_u64(99);
    let mut sim = GrowthSimulation::seed_with_events(&terrain, &config, Vec3::ZERO, &mut sinks)?;

    let mut blocked_streak = 0usize;
    while sim.iteration() < 400 && blocked_streak < 25 {
        match sim.step(&mut rng, &mut sinks) {
            Some(StepOutcome::Grew { .. }) => blocked_streak = 0,
            Some(StepOutcome::Blocked { .. }) => blocked_streak += 1,
            None => break,
        }
    }
    let result = sim.finish(&mut sinks);

    let sinks = sinks.into_sinks();
    tracing::info!(
        "Rolling hills: {} modules after {} iterations ({} placements, {} blocked).",
        result.colony.len(),
        result.iterations,
        sinks[0].len(),
        sinks[1].len()
    );

    let mut replay_rng = StdRng::seed_from_u64(99);
    let positions = run_simulation(
        &terrain,
        Vec3::ZERO,
        result.iterations,
        &config,
        &mut replay_rng,
    )?;
    tracing::info!(
        "Replaying the same seed through run_simulation yields {} positions.",
        positions.len()
    );

    let rc = RenderConfig::new((900, 900), Vec2::splat(192.0)).with_module_radius(2);
    render_colony_to_png(
        &result.colony,
        Some(&terrain),
        &rc,
        "growth-rolling-hills-stepwise.png",
    )?;
    Ok(())
}
