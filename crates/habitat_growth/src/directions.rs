//! Fixed angular sensing pattern.
//!
//! Offsets lie in the world XY plane and are never re-oriented to the local
//! surface tangent at the cursor.
use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::GrowthConfig;

/// Ordered set of evenly spaced offsets around the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionSet {
    offsets: Vec<Vec3>,
}

impl DirectionSet {
    /// Creates `count` offsets of length `magnitude`, `360 / count` degrees apart,
    /// starting along +X.
    pub fn new(count: usize, magnitude: f32) -> Self {
        Self {
            offsets: generate(count, magnitude),
        }
    }

    /// Creates the sensing pattern for a run.
    pub fn from_config(config: &GrowthConfig) -> Self {
        Self::new(config.direction_count(), config.step_size())
    }

    pub fn offsets(&self) -> &[Vec3] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.offsets.iter().copied()
    }
}

/// Generates `count` offsets of length `magnitude` in the XY plane.
///
/// Returns an empty list for `count == 0` or a non-positive / non-finite magnitude.
pub fn generate(count: usize, magnitude: f32) -> Vec<Vec3> {
    if count == 0 || !magnitude.is_finite() || magnitude <= 0.0 {
        return Vec::new();
    }

    let step = TAU / count as f32;
    (0..count)
        .map(|i| {
            let (sin, cos) = (i as f32 * step).sin_cos();
            Vec3::new(cos, sin, 0.0) * magnitude
        })
        .collect()
}
