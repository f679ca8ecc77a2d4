//! Infinite planar surface.
use glam::Vec3;

use crate::error::{Error, Result};
use crate::surface::{GeometryOracle, SurfaceHit};

/// An infinite plane through `origin` with a constant unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Creates a plane, normalizing `normal`.
    pub fn new(origin: Vec3, normal: Vec3) -> Result<Self> {
        let normal = normal
            .try_normalize()
            .ok_or_else(|| Error::InvalidSurface("plane normal must be non-zero".into()))?;
        if !origin.is_finite() {
            return Err(Error::InvalidSurface("plane origin must be finite".into()));
        }
        Ok(Self { origin, normal })
    }

    /// Horizontal plane `z = height` facing +Z.
    pub fn horizontal(height: f32) -> Self {
        Self {
            origin: Vec3::new(0.0, 0.0, height),
            normal: Vec3::Z,
        }
    }

    /// Plane through `origin` whose normal is tilted away from +Z by
    /// `slope_deg` degrees, leaning toward +X.
    pub fn tilted(origin: Vec3, slope_deg: f32) -> Result<Self> {
        let (sin, cos) = slope_deg.to_radians().sin_cos();
        Self::new(origin, Vec3::new(sin, 0.0, cos))
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl GeometryOracle for Plane {
    fn project(&self, point: Vec3, search_radius: f32) -> Option<SurfaceHit> {
        let offset = (point - self.origin).dot(self.normal);
        if !offset.is_finite() || offset.abs() > search_radius {
            return None;
        }
        Some(SurfaceHit {
            position: point - self.normal * offset,
            normal: self.normal,
        })
    }
}
