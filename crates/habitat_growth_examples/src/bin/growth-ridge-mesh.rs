use glam::{Vec2, Vec3};
use habitat_growth::prelude::*;
use habitat_growth_examples::{init_tracing, render_colony_to_png, ridge, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Grow on a triangulated ridge; the mesh oracle interpolates vertex normals.
    let field = ridge(40.0)?;
    let mesh = TriangleMesh::from_height_field(&field)?;
    let config = GrowthConfig::default();

    let mut placed = 0usize;
    let mut sink = FnSink::new(|event| {
        if let GrowthEvent::ModulePlaced { module, score, .. } = event {
            placed += 1;
            tracing::debug!(
                "Module {} at {} (score {:.2}).",
                module.creation_index,
                module.position,
                score
            );
        }
    });
    let mut rng = StdRng::seed_from_u64(2024);
    let sink_ref: &mut dyn EventSink = &mut sink;
    let result = run_growth(
        &mesh,
        &config,
        Vec3::new(-20.0, 0.0, 30.0),
        120,
        &mut rng,
        Some(sink_ref),
    )?;
    drop(sink);

    tracing::info!(
        "Ridge mesh: {} modules ({} placed by growth), {} of {} candidates rejected.",
        result.colony.len(),
        placed,
        result.candidates_rejected,
        result.candidates_evaluated
    );

    let rc = RenderConfig::new((800, 800), Vec2::splat(80.0));
    render_colony_to_png(&result.colony, Some(&field), &rc, "growth-ridge-mesh.png")?;
    Ok(())
}
