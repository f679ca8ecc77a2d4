use glam::{Vec2, Vec3};
use habitat_growth::prelude::*;
use habitat_growth_examples::{crater, init_tracing, render_colony_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // The rim walls are steeper than the slope limit, so the colony fills the
    // crater floor and then keeps budding from random existing modules.
    let terrain = crater(60.0, 28.0, 16.0)?;
    let config = GrowthConfig::builder()
        .with_max_slope_deg(25.0)
        .with_sun_vector(Vec3::new(0.3, -1.0, 0.4))
        .build()?;
    let runner = GrowthRunner::new(config.clone(), &terrain);

    let mut sink = VecSink::only([GrowthEventKind::Blocked, GrowthEventKind::ModulePlaced]);
    let mut rng = StdRng::seed_from_u64(7);
    let result = runner.run_with_events(Vec3::new(-6.0, 10.0, 0.0), 300, &mut rng, &mut sink)?;

    let backtracks = sink
        .as_slice()
        .iter()
        .filter(|e| e.kind() == GrowthEventKind::Blocked)
        .count();
    tracing::info!(
        "Crater: {} modules placed over {} iterations, {} backtracks.",
        result.colony.len(),
        result.iterations,
        backtracks
    );

    let rc = RenderConfig::new((900, 900), Vec2::splat(120.0))
        .with_slope_limit_deg(config.max_slope_deg());
    render_colony_to_png(
        &result.colony,
        Some(&terrain),
        &rc,
        "growth-crater-backtracking.png",
    )?;
    Ok(())
}
