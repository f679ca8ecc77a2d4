//! Surface projection capability used to ground growth candidates.
//!
//! The growth core only needs "nearest surface point plus normal". Any terrain
//! representation can provide it by implementing [`GeometryOracle`]; this module
//! ships a few reference implementations used by tests, benches, and examples.
use glam::Vec3;

pub mod height_field;
pub mod mesh;
pub mod plane;

pub use height_field::HeightField;
pub use mesh::TriangleMesh;
pub use plane::Plane;

/// A grounded point on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Closest surface position.
    pub position: Vec3,
    /// Surface normal at [`Self::position`]. Expected to be unit length.
    pub normal: Vec3,
}

impl SurfaceHit {
    pub fn new(position: impl Into<Vec3>, normal: impl Into<Vec3>) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
        }
    }
}

/// Projects points onto a surface.
pub trait GeometryOracle: Send + Sync {
    /// Returns the surface point nearest to `point` together with its normal,
    /// or `None` when no surface point lies within `search_radius`.
    fn project(&self, point: Vec3, search_radius: f32) -> Option<SurfaceHit>;
}

impl<T: GeometryOracle + ?Sized> GeometryOracle for &T {
    #[inline]
    fn project(&self, point: Vec3, search_radius: f32) -> Option<SurfaceHit> {
        (**self).project(point, search_radius)
    }
}

impl<T: GeometryOracle + ?Sized> GeometryOracle for Box<T> {
    #[inline]
    fn project(&self, point: Vec3, search_radius: f32) -> Option<SurfaceHit> {
        (**self).project(point, search_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nowhere;

    impl GeometryOracle for Nowhere {
        fn project(&self, _point: Vec3, _search_radius: f32) -> Option<SurfaceHit> {
            None
        }
    }

    #[test]
    fn surface_hit_accepts_mint_vectors() {
        let hit = SurfaceHit::new(
            mint::Vector3 {
                x: 1.0,
                y: 2.0,
                z: 3.0,
            },
            Vec3::Z,
        );
        assert_eq!(hit.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn boxed_and_borrowed_oracles_delegate() {
        let plane = Plane::horizontal(0.0);
        let boxed: Box<dyn GeometryOracle> = Box::new(Plane::horizontal(0.0));
        let p = Vec3::new(1.0, 1.0, 4.0);
        assert_eq!((&plane).project(p, 10.0), plane.project(p, 10.0));
        assert_eq!(boxed.project(p, 10.0), plane.project(p, 10.0));
        assert!(Box::new(Nowhere).project(p, 10.0).is_none());
    }
}
