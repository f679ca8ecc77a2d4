use glam::{Vec2, Vec3};
use habitat_growth::prelude::*;
use habitat_growth_examples::{init_tracing, render_colony_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // On an unobstructed plain the colony marches straight toward the sun.
    let plain = Plane::horizontal(0.0);
    let config = GrowthConfig::default();
    let runner = GrowthRunner::new(config, &plain);
    let mut rng = StdRng::seed_from_u64(42);

    let result = runner.run(Vec3::ZERO, DEFAULT_MAX_MODULES, &mut rng)?;
    tracing::info!(
        "Flat plain: {} modules, {} blocked iterations.",
        result.colony.len(),
        result.blocked_iterations
    );

    let rc = RenderConfig::new((800, 800), Vec2::splat(1100.0))
        .with_domain_center(Vec2::new(0.0, -520.0))
        .with_module_radius(2);
    render_colony_to_png(&result.colony, None, &rc, "growth-flat-plain.png")?;
    Ok(())
}
