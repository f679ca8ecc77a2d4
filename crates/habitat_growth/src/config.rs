//! Immutable growth parameters.
//!
//! A [`GrowthConfig`] is built once through [`GrowthConfigBuilder`], validated,
//! and then only read. Every component of a run borrows the same value.
use glam::Vec3;

use crate::error::{Error, Result};

/// Default maximum traversable terrain slope in degrees.
pub const DEFAULT_MAX_SLOPE_DEG: f32 = 30.0;
/// Default module spacing (module diameter).
pub const DEFAULT_MIN_DIST: f32 = 3.0;
/// Default arm length between connected modules.
pub const DEFAULT_STEP_SIZE: f32 = 3.5;
/// Default subtractive margin on the spacing check.
pub const DEFAULT_TOLERANCE: f32 = 0.1;
/// Default search radius when grounding growth candidates.
pub const DEFAULT_SENSING_RADIUS: f32 = 1000.0;
/// Default search radius when grounding the seed.
pub const DEFAULT_SEED_SEARCH_RADIUS: f32 = 1.0e6;
/// Default number of sensing directions (hexagonal pattern).
pub const DEFAULT_DIRECTION_COUNT: usize = 6;

/// Default (unnormalized) solar direction.
pub const DEFAULT_SUN_VECTOR: Vec3 = Vec3::new(0.0, -3.0, 0.5);

/// Validated, read-only parameters of a growth run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GrowthConfigBuilder", into = "GrowthConfigBuilder")
)]
pub struct GrowthConfig {
    max_slope_deg: f32,
    min_dist: f32,
    step_size: f32,
    sun_vector: Vec3,
    tolerance: f32,
    sensing_radius: f32,
    seed_search_radius: f32,
    direction_count: usize,
    up_axis: Vec3,
}

impl GrowthConfig {
    /// Starts a builder populated with the default parameters.
    pub fn builder() -> GrowthConfigBuilder {
        GrowthConfigBuilder::default()
    }

    /// Maximum allowed angle in degrees between a surface normal and the up axis.
    pub fn max_slope_deg(&self) -> f32 {
        self.max_slope_deg
    }

    /// Nominal minimum distance between modules.
    pub fn min_dist(&self) -> f32 {
        self.min_dist
    }

    /// Length of each sensing offset.
    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    /// Unit solar direction.
    pub fn sun_vector(&self) -> Vec3 {
        self.sun_vector
    }

    /// Margin subtracted from [`Self::min_dist`] in the spacing check.
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Effective spacing threshold: `min_dist - tolerance`.
    pub fn spacing_threshold(&self) -> f32 {
        self.min_dist - self.tolerance
    }

    /// Search radius used when grounding growth candidates.
    pub fn sensing_radius(&self) -> f32 {
        self.sensing_radius
    }

    /// Search radius used when grounding the seed.
    pub fn seed_search_radius(&self) -> f32 {
        self.seed_search_radius
    }

    /// Number of evenly spaced sensing directions.
    pub fn direction_count(&self) -> usize {
        self.direction_count
    }

    /// Unit reference "up" axis for slope measurement.
    pub fn up_axis(&self) -> Vec3 {
        self.up_axis
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            max_slope_deg: DEFAULT_MAX_SLOPE_DEG,
            min_dist: DEFAULT_MIN_DIST,
            step_size: DEFAULT_STEP_SIZE,
            sun_vector: DEFAULT_SUN_VECTOR.normalize(),
            tolerance: DEFAULT_TOLERANCE,
            sensing_radius: DEFAULT_SENSING_RADIUS,
            seed_search_radius: DEFAULT_SEED_SEARCH_RADIUS,
            direction_count: DEFAULT_DIRECTION_COUNT,
            up_axis: Vec3::Z,
        }
    }
}

/// Unvalidated parameters for constructing a [`GrowthConfig`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GrowthConfigBuilder {
    pub max_slope_deg: f32,
    pub min_dist: f32,
    pub step_size: f32,
    pub sun_vector: Vec3,
    pub tolerance: f32,
    pub sensing_radius: f32,
    pub seed_search_radius: f32,
    pub direction_count: usize,
    pub up_axis: Vec3,
}

impl Default for GrowthConfigBuilder {
    fn default() -> Self {
        Self {
            max_slope_deg: DEFAULT_MAX_SLOPE_DEG,
            min_dist: DEFAULT_MIN_DIST,
            step_size: DEFAULT_STEP_SIZE,
            sun_vector: DEFAULT_SUN_VECTOR,
            tolerance: DEFAULT_TOLERANCE,
            sensing_radius: DEFAULT_SENSING_RADIUS,
            seed_search_radius: DEFAULT_SEED_SEARCH_RADIUS,
            direction_count: DEFAULT_DIRECTION_COUNT,
            up_axis: Vec3::Z,
        }
    }
}

impl GrowthConfigBuilder {
    /// Sets the maximum traversable slope in degrees.
    pub fn with_max_slope_deg(mut self, max_slope_deg: f32) -> Self {
        self.max_slope_deg = max_slope_deg;
        self
    }

    /// Sets the nominal module spacing.
    pub fn with_min_dist(mut self, min_dist: f32) -> Self {
        self.min_dist = min_dist;
        self
    }

    /// Sets the sensing step length.
    pub fn with_step_size(mut self, step_size: f32) -> Self {
        self.step_size = step_size;
        self
    }

    /// Sets the solar direction. Normalized on [`Self::build`].
    pub fn with_sun_vector(mut self, sun_vector: Vec3) -> Self {
        self.sun_vector = sun_vector;
        self
    }

    /// Sets the spacing tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the candidate grounding radius.
    pub fn with_sensing_radius(mut self, sensing_radius: f32) -> Self {
        self.sensing_radius = sensing_radius;
        self
    }

    /// Sets the seed grounding radius.
    pub fn with_seed_search_radius(mut self, seed_search_radius: f32) -> Self {
        self.seed_search_radius = seed_search_radius;
        self
    }

    /// Sets the number of sensing directions.
    pub fn with_direction_count(mut self, direction_count: usize) -> Self {
        self.direction_count = direction_count;
        self
    }

    /// Sets the up axis used for slope measurement. Normalized on [`Self::build`].
    pub fn with_up_axis(mut self, up_axis: Vec3) -> Self {
        self.up_axis = up_axis;
        self
    }

    /// Validates the parameters, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("max_slope_deg", self.max_slope_deg),
            ("min_dist", self.min_dist),
            ("step_size", self.step_size),
            ("tolerance", self.tolerance),
            ("sensing_radius", self.sensing_radius),
            ("seed_search_radius", self.seed_search_radius),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!("{name} must be finite")));
        }
        if self.step_size <= 0.0 {
            return Err(Error::InvalidConfig("step_size must be > 0".into()));
        }
        if self.min_dist <= 0.0 {
            return Err(Error::InvalidConfig("min_dist must be > 0".into()));
        }
        if !(0.0..=90.0).contains(&self.max_slope_deg) {
            return Err(Error::InvalidConfig(
                "max_slope_deg must be within [0, 90]".into(),
            ));
        }
        if self.tolerance < 0.0 {
            return Err(Error::InvalidConfig("tolerance must be >= 0".into()));
        }
        if self.sensing_radius < self.step_size {
            return Err(Error::InvalidConfig(
                "sensing_radius must be >= step_size".into(),
            ));
        }
        if self.seed_search_radius <= 0.0 {
            return Err(Error::InvalidConfig(
                "seed_search_radius must be > 0".into(),
            ));
        }
        if self.direction_count == 0 {
            return Err(Error::InvalidConfig("direction_count must be >= 1".into()));
        }
        if self.sun_vector.try_normalize().is_none() {
            return Err(Error::InvalidConfig(
                "sun_vector must be finite and non-zero".into(),
            ));
        }
        if self.up_axis.try_normalize().is_none() {
            return Err(Error::InvalidConfig(
                "up_axis must be finite and non-zero".into(),
            ));
        }

        Ok(())
    }

    /// Validates and freezes the parameters.
    pub fn build(self) -> Result<GrowthConfig> {
        self.validate()?;
        let sun_vector = self
            .sun_vector
            .try_normalize()
            .ok_or_else(|| Error::InvalidConfig("sun_vector must be non-zero".into()))?;
        let up_axis = self
            .up_axis
            .try_normalize()
            .ok_or_else(|| Error::InvalidConfig("up_axis must be non-zero".into()))?;

        Ok(GrowthConfig {
            max_slope_deg: self.max_slope_deg,
            min_dist: self.min_dist,
            step_size: self.step_size,
            sun_vector,
            tolerance: self.tolerance,
            sensing_radius: self.sensing_radius,
            seed_search_radius: self.seed_search_radius,
            direction_count: self.direction_count,
            up_axis,
        })
    }
}

impl TryFrom<GrowthConfigBuilder> for GrowthConfig {
    type Error = Error;

    fn try_from(value: GrowthConfigBuilder) -> Result<Self> {
        value.build()
    }
}

impl From<GrowthConfig> for GrowthConfigBuilder {
    fn from(value: GrowthConfig) -> Self {
        Self {
            max_slope_deg: value.max_slope_deg,
            min_dist: value.min_dist,
            step_size: value.step_size,
            sun_vector: value.sun_vector,
            tolerance: value.tolerance,
            sensing_radius: value.sensing_radius,
            seed_search_radius: value.seed_search_radius,
            direction_count: value.direction_count,
            up_axis: value.up_axis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_builder_defaults() {
        let built = GrowthConfig::builder().build().expect("defaults are valid");
        assert_eq!(built, GrowthConfig::default());
        assert!((built.sun_vector().length() - 1.0).abs() < 1e-6);
        assert_eq!(built.up_axis(), Vec3::Z);
        assert!((built.spacing_threshold() - 2.9).abs() < 1e-6);
    }

    #[test]
    fn build_normalizes_sun_and_up() {
        let cfg = GrowthConfig::builder()
            .with_sun_vector(Vec3::new(0.0, -10.0, 0.0))
            .with_up_axis(Vec3::new(0.0, 0.0, 5.0))
            .build()
            .unwrap();
        assert_eq!(cfg.sun_vector(), Vec3::NEG_Y);
        assert_eq!(cfg.up_axis(), Vec3::Z);
    }

    #[test]
    fn rejects_non_positive_step_and_spacing() {
        let err = GrowthConfig::builder().with_step_size(0.0).build();
        assert!(matches!(err, Err(Error::InvalidConfig(ref m)) if m.contains("step_size")));

        let err = GrowthConfig::builder().with_min_dist(-1.0).build();
        assert!(matches!(err, Err(Error::InvalidConfig(ref m)) if m.contains("min_dist")));
    }

    #[test]
    fn slope_bounds_are_inclusive() {
        assert!(GrowthConfig::builder().with_max_slope_deg(0.0).build().is_ok());
        assert!(GrowthConfig::builder().with_max_slope_deg(90.0).build().is_ok());
        assert!(GrowthConfig::builder().with_max_slope_deg(90.5).build().is_err());
        assert!(GrowthConfig::builder().with_max_slope_deg(-0.1).build().is_err());
    }

    #[test]
    fn rejects_zero_or_non_finite_vectors() {
        assert!(GrowthConfig::builder()
            .with_sun_vector(Vec3::ZERO)
            .build()
            .is_err());
        assert!(GrowthConfig::builder()
            .with_sun_vector(Vec3::new(f32::NAN, 0.0, 1.0))
            .build()
            .is_err());
        assert!(GrowthConfig::builder()
            .with_up_axis(Vec3::ZERO)
            .build()
            .is_err());
    }

    #[test]
    fn rejects_sensing_radius_below_step() {
        let err = GrowthConfig::builder()
            .with_step_size(3.5)
            .with_sensing_radius(1.0)
            .build();
        assert!(matches!(err, Err(Error::InvalidConfig(ref m)) if m.contains("sensing_radius")));
    }

    #[test]
    fn rejects_remaining_invalid_parameters() {
        assert!(GrowthConfig::builder().with_tolerance(-0.5).build().is_err());
        assert!(GrowthConfig::builder()
            .with_tolerance(f32::INFINITY)
            .build()
            .is_err());
        assert!(GrowthConfig::builder()
            .with_seed_search_radius(0.0)
            .build()
            .is_err());
        assert!(GrowthConfig::builder()
            .with_direction_count(0)
            .build()
            .is_err());
    }

    #[test]
    fn builder_roundtrips_through_config() {
        let cfg = GrowthConfig::builder()
            .with_min_dist(4.0)
            .with_direction_count(8)
            .build()
            .unwrap();
        let rebuilt = GrowthConfig::try_from(GrowthConfigBuilder::from(cfg.clone())).unwrap();
        assert_eq!(rebuilt, cfg);
    }
}
