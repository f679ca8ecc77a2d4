use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec2;
use habitat_growth::surface::HeightField;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Square rolling terrain of `half_extent * 2` world units, one sample per unit.
pub fn rolling_terrain(half_extent: f32) -> HeightField {
    let samples = (half_extent * 2.0) as usize + 1;
    HeightField::from_fn(Vec2::splat(-half_extent), 1.0, samples, samples, |x, y| {
        3.0 * (x * 0.08).sin() * (y * 0.06).cos() + 0.5 * (x * 0.3 + y * 0.2).sin()
    })
    .expect("valid bench terrain")
}
