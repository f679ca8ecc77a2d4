#![forbid(unsafe_code)]
//! habitat_growth: solar-biased colony growth of habitat modules across 3D terrain.
//!
//! A colony starts from a grounded seed and grows one module per iteration by
//! sensing a fixed hexagonal pattern around a cursor, discarding candidates that
//! are too steep or too close to existing modules, and keeping the survivor best
//! aligned with the sun. When nothing survives, growth resumes from a randomly
//! chosen existing module.
//!
//! Modules:
//! - config: validated, immutable growth parameters
//! - directions: the fixed sensing pattern
//! - surface: the [`surface::GeometryOracle`] capability and reference surfaces
//! - growth: colony types, constraints, selection, events, and the growth driver
pub mod config;
pub mod directions;
pub mod error;
pub mod growth;
pub mod surface;

/// Convenient re-exports for common types. Import with `use habitat_growth::prelude::*;`.
pub mod prelude {
    pub use crate::config::{GrowthConfig, GrowthConfigBuilder};
    pub use crate::directions::DirectionSet;
    pub use crate::error::{Error, Result};
    pub use crate::growth::constraints::{slope_deg, Candidate, ConstraintEvaluator, Rejection};
    pub use crate::growth::driver::{
        run_growth, run_simulation, GrowthPhase, GrowthRunner, GrowthSimulation, RunResult,
        StepOutcome,
    };
    pub use crate::growth::events::{
        EventSink, FnSink, GrowthEvent, GrowthEventKind, MultiSink, VecSink,
    };
    pub use crate::growth::selection::{pick_most_sun_aligned, solar_score, Selection};
    pub use crate::growth::{Colony, Module, DEFAULT_MAX_MODULES};
    pub use crate::surface::{GeometryOracle, HeightField, Plane, SurfaceHit, TriangleMesh};
}
