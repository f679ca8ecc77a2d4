//! Procedural terrains used by the example binaries.
use glam::Vec2;
use habitat_growth::prelude::*;

fn square_field(
    half_extent: f32,
    cell_size: f32,
    f: impl FnMut(f32, f32) -> f32,
) -> Result<HeightField> {
    let samples = ((2.0 * half_extent) / cell_size).ceil() as usize + 1;
    HeightField::from_fn(Vec2::splat(-half_extent), cell_size, samples, samples, f)
}

/// Gentle undulating plain.
pub fn rolling_hills(half_extent: f32) -> Result<HeightField> {
    square_field(half_extent, 1.0, |x, y| {
        2.5 * (x * 0.07).sin() * (y * 0.05).cos() + 0.6 * (x * 0.23 - y * 0.17).sin()
    })
}

/// Bowl with a steep rim at `rim_radius`; the floor is flat and the rim walls
/// exceed typical slope limits, so growth inside keeps backtracking.
pub fn crater(half_extent: f32, rim_radius: f32, rim_height: f32) -> Result<HeightField> {
    square_field(half_extent, 0.5, |x, y| {
        let r = (x * x + y * y).sqrt();
        let rim = rim_height * (-(r - rim_radius).powi(2) / 6.0).exp();
        let floor = if r < rim_radius { -0.02 * (rim_radius - r) } else { 0.0 };
        rim + floor
    })
}

/// Long ridge running along Y with a saddle near the origin.
pub fn ridge(half_extent: f32) -> Result<HeightField> {
    square_field(half_extent, 1.0, |x, y| {
        let crest = 14.0 * (-(x * x) / 120.0).exp();
        let saddle = 1.0 - 0.6 * (-(y * y) / 80.0).exp();
        crest * saddle
    })
}
