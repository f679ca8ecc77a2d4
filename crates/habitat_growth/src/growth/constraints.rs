//! Slope and spacing filters applied to sensed candidates.
//!
//! Each raw candidate is grounded through the [`GeometryOracle`], then rejected
//! when the terrain is too steep or an existing module is too close. Rejection
//! is an ordinary outcome and is returned as a value.
use glam::Vec3;

use crate::config::GrowthConfig;
use crate::growth::Colony;
use crate::surface::{GeometryOracle, SurfaceHit};

/// A grounded candidate that passed every constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position in the sensing pattern.
    pub direction_index: usize,
    /// Sensing offset that produced the raw point.
    pub offset: Vec3,
    /// Cursor plus offset, before grounding.
    pub raw: Vec3,
    /// Grounded surface position.
    pub position: Vec3,
    /// Surface normal at [`Self::position`].
    pub normal: Vec3,
}

/// Why a candidate was discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// No surface within the sensing radius, a non-finite position, or a
    /// degenerate normal.
    Ungrounded,
    /// Terrain slope exceeds the configured limit.
    TooSteep { slope_deg: f32 },
    /// An existing module lies closer than `min_dist - tolerance`.
    TooClose { distance: f32 },
}

/// Angle in degrees between `normal` and `up`, or `None` for a degenerate normal.
pub fn slope_deg(normal: Vec3, up: Vec3) -> Option<f32> {
    let n = normal.try_normalize()?;
    let u = up.try_normalize()?;
    Some(n.dot(u).clamp(-1.0, 1.0).acos().to_degrees())
}

/// Filters candidates against a configuration, a surface, and the current colony.
pub struct ConstraintEvaluator<'a, O: GeometryOracle + ?Sized> {
    config: &'a GrowthConfig,
    oracle: &'a O,
}

impl<O: GeometryOracle + ?Sized> Clone for ConstraintEvaluator<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: GeometryOracle + ?Sized> Copy for ConstraintEvaluator<'_, O> {}

impl<'a, O: GeometryOracle + ?Sized> ConstraintEvaluator<'a, O> {
    pub fn new(config: &'a GrowthConfig, oracle: &'a O) -> Self {
        Self { config, oracle }
    }

    /// Grounds `raw` and checks slope and spacing.
    pub fn evaluate(&self, raw: Vec3, colony: &Colony) -> Result<SurfaceHit, Rejection> {
        let hit = self
            .oracle
            .project(raw, self.config.sensing_radius())
            .filter(|hit| hit.position.is_finite())
            .ok_or(Rejection::Ungrounded)?;

        let slope =
            slope_deg(hit.normal, self.config.up_axis()).ok_or(Rejection::Ungrounded)?;
        if slope > self.config.max_slope_deg() {
            return Err(Rejection::TooSteep { slope_deg: slope });
        }

        let distance = colony.min_distance_to(hit.position);
        if distance < self.config.spacing_threshold() {
            return Err(Rejection::TooClose { distance });
        }

        Ok(hit)
    }

    /// Like [`Self::evaluate`], discarding the rejection reason.
    pub fn accept(&self, raw: Vec3, colony: &Colony) -> Option<SurfaceHit> {
        self.evaluate(raw, colony).ok()
    }

    /// Senses one direction from `cursor` and evaluates the resulting point.
    pub fn evaluate_offset(
        &self,
        cursor: Vec3,
        direction_index: usize,
        offset: Vec3,
        colony: &Colony,
    ) -> Result<Candidate, Rejection> {
        let raw = cursor + offset;
        let hit = self.evaluate(raw, colony)?;
        Ok(Candidate {
            direction_index,
            offset,
            raw,
            position: hit.position,
            normal: hit.normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::Module;
    use crate::surface::Plane;

    struct Nowhere;

    impl GeometryOracle for Nowhere {
        fn project(&self, _point: Vec3, _search_radius: f32) -> Option<SurfaceHit> {
            None
        }
    }

    struct FixedNormal(Vec3);

    impl GeometryOracle for FixedNormal {
        fn project(&self, point: Vec3, _search_radius: f32) -> Option<SurfaceHit> {
            Some(SurfaceHit::new(point, self.0))
        }
    }

    fn colony_at_origin() -> Colony {
        Colony::new(Vec3::ZERO, Vec3::Z)
    }

    #[test]
    fn slope_of_up_normal_is_zero() {
        assert_eq!(slope_deg(Vec3::Z, Vec3::Z), Some(0.0));
        assert!((slope_deg(Vec3::X, Vec3::Z).unwrap() - 90.0).abs() < 1e-4);
        assert!(slope_deg(Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn accepts_flat_and_distant_candidate() {
        let cfg = GrowthConfig::default();
        let plane = Plane::horizontal(0.0);
        let eval = ConstraintEvaluator::new(&cfg, &plane);
        let hit = eval
            .evaluate(Vec3::new(3.5, 0.0, 1.0), &colony_at_origin())
            .unwrap();
        assert_eq!(hit.position, Vec3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn rejects_ungrounded_candidate() {
        let cfg = GrowthConfig::default();
        let eval = ConstraintEvaluator::new(&cfg, &Nowhere);
        assert_eq!(
            eval.evaluate(Vec3::X * 3.5, &colony_at_origin()),
            Err(Rejection::Ungrounded)
        );
        assert!(eval.accept(Vec3::X * 3.5, &colony_at_origin()).is_none());
    }

    #[test]
    fn rejects_degenerate_normal_as_ungrounded() {
        let cfg = GrowthConfig::default();
        let oracle = FixedNormal(Vec3::ZERO);
        let eval = ConstraintEvaluator::new(&cfg, &oracle);
        assert_eq!(
            eval.evaluate(Vec3::X * 3.5, &colony_at_origin()),
            Err(Rejection::Ungrounded)
        );
    }

    #[test]
    fn rejects_non_finite_position_as_ungrounded() {
        let cfg = GrowthConfig::default();
        let oracle = FixedNormal(Vec3::Z);
        let eval = ConstraintEvaluator::new(&cfg, &oracle);
        assert_eq!(
            eval.evaluate(Vec3::new(f32::NAN, 0.0, 0.0), &colony_at_origin()),
            Err(Rejection::Ungrounded)
        );
        assert_eq!(
            eval.evaluate(Vec3::new(0.0, f32::INFINITY, 0.0), &colony_at_origin()),
            Err(Rejection::Ungrounded)
        );
    }

    #[test]
    fn slope_limit_separates_gentle_from_steep() {
        let cfg = GrowthConfig::default();
        let gentle = Plane::tilted(Vec3::ZERO, 29.0).unwrap();
        let steep = Plane::tilted(Vec3::ZERO, 31.0).unwrap();
        let colony = colony_at_origin();

        assert!(ConstraintEvaluator::new(&cfg, &gentle)
            .evaluate(Vec3::new(0.0, 3.5, 0.0), &colony)
            .is_ok());
        let err = ConstraintEvaluator::new(&cfg, &steep)
            .evaluate(Vec3::new(0.0, 3.5, 0.0), &colony)
            .unwrap_err();
        assert!(matches!(err, Rejection::TooSteep { slope_deg } if slope_deg > 30.0));
    }

    #[test]
    fn spacing_uses_tolerance_margin() {
        let cfg = GrowthConfig::default();
        let plane = Plane::horizontal(0.0);
        let eval = ConstraintEvaluator::new(&cfg, &plane);
        let colony = colony_at_origin();

        // 2.95 is below min_dist (3.0) but above min_dist - tolerance (2.9).
        assert!(eval.evaluate(Vec3::new(2.95, 0.0, 0.0), &colony).is_ok());
        let err = eval
            .evaluate(Vec3::new(2.5, 0.0, 0.0), &colony)
            .unwrap_err();
        assert!(matches!(err, Rejection::TooClose { distance } if (distance - 2.5).abs() < 1e-6));
    }

    #[test]
    fn spacing_checks_every_module() {
        let cfg = GrowthConfig::default();
        let plane = Plane::horizontal(0.0);
        let eval = ConstraintEvaluator::new(&cfg, &plane);
        let mut colony = colony_at_origin();
        colony.push(Module {
            position: Vec3::new(7.0, 0.0, 0.0),
            normal: Vec3::Z,
            creation_index: 1,
        });
        assert!(matches!(
            eval.evaluate(Vec3::new(5.5, 0.0, 0.0), &colony),
            Err(Rejection::TooClose { .. })
        ));
    }

    #[test]
    fn evaluate_offset_records_sensing_data() {
        let cfg = GrowthConfig::default();
        let plane = Plane::horizontal(0.0);
        let eval = ConstraintEvaluator::new(&cfg, &plane);
        let cursor = Vec3::new(1.0, 1.0, 0.0);
        let offset = Vec3::new(0.0, -3.5, 0.0);
        let cand = eval
            .evaluate_offset(cursor, 4, offset, &Colony::new(cursor, Vec3::Z))
            .unwrap();
        assert_eq!(cand.direction_index, 4);
        assert_eq!(cand.raw, cursor + offset);
        assert_eq!(cand.position, Vec3::new(1.0, -2.5, 0.0));
        assert_eq!(cand.normal, Vec3::Z);
    }
}
