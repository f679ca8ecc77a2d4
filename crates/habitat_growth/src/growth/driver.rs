//! Growth loop: seeding, sensing, selection, and stochastic backtracking.
//!
//! [`GrowthSimulation`] owns the colony and the cursor and advances one decision
//! iteration per [`GrowthSimulation::step`]. [`GrowthRunner`] and
//! [`run_simulation`] drive it across a whole attempt budget.
//!
//! Every iteration senses the fixed [`DirectionSet`] around the cursor, filters
//! the candidates through the [`ConstraintEvaluator`], and either appends the
//! most sun-aligned survivor or, when nothing survives, moves the cursor to a
//! uniformly chosen existing module. Blocked iterations count against the
//! budget, so `max_modules` bounds attempts rather than placements.
use glam::Vec3;
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::config::{GrowthConfig, GrowthConfigBuilder};
use crate::directions::DirectionSet;
use crate::error::{Error, Result};
use crate::growth::constraints::{Candidate, ConstraintEvaluator};
use crate::growth::events::{EventSink, GrowthEvent, GrowthEventKind};
use crate::growth::selection::pick_most_sun_aligned;
use crate::growth::{Colony, Module};
use crate::surface::GeometryOracle;

/// Lifecycle state of a [`GrowthSimulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPhase {
    /// Seed grounded, no iteration performed yet.
    Seeded,
    /// The last iteration appended a module.
    Growing,
    /// The last iteration rejected every candidate and backtracked.
    Blocked,
    /// The attempt budget is exhausted.
    Terminated,
}

/// Outcome of a single decision iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// A module was appended at `colony_index`.
    Grew {
        colony_index: usize,
        direction_index: usize,
        score: f32,
    },
    /// No candidate survived; the cursor moved to `cursor_index`.
    Blocked { cursor_index: usize },
}

/// Summary of a completed growth run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Final colony in growth order.
    pub colony: Colony,
    /// Decision iterations performed.
    pub iterations: usize,
    /// Iterations that ended blocked.
    pub blocked_iterations: usize,
    /// Raw candidates sensed across all iterations.
    pub candidates_evaluated: usize,
    /// Raw candidates discarded by a constraint or a grounding miss.
    pub candidates_rejected: usize,
}

/// Stateful growth simulation over a borrowed surface.
pub struct GrowthSimulation<'a, O: GeometryOracle + ?Sized> {
    config: &'a GrowthConfig,
    oracle: &'a O,
    directions: DirectionSet,
    colony: Colony,
    cursor: Vec3,
    cursor_index: usize,
    iteration: usize,
    phase: GrowthPhase,
    blocked_iterations: usize,
    candidates_evaluated: usize,
    candidates_rejected: usize,
}

impl<'a, O: GeometryOracle + ?Sized> GrowthSimulation<'a, O> {
    /// Grounds `seed_point` and starts a colony there.
    ///
    /// Fails with [`Error::SeedProjection`] when the surface has no point within
    /// the configured seed search radius.
    pub fn seed(oracle: &'a O, config: &'a GrowthConfig, seed_point: Vec3) -> Result<Self> {
        Self::seed_with_events(oracle, config, seed_point, &mut ())
    }

    pub fn seed_with_events(
        oracle: &'a O,
        config: &'a GrowthConfig,
        seed_point: Vec3,
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        let hit = oracle
            .project(seed_point, config.seed_search_radius())
            .filter(|hit| hit.position.is_finite())
            .ok_or(Error::SeedProjection { seed: seed_point })?;

        let colony = Colony::new(hit.position, hit.normal);
        info!(
            "Growth seeded at {} (requested {}).",
            hit.position, seed_point
        );
        if sink.wants(GrowthEventKind::Seeded) {
            sink.send(GrowthEvent::Seeded {
                requested: seed_point,
                module: *colony.seed(),
            });
        }

        Ok(Self {
            config,
            oracle,
            directions: DirectionSet::from_config(config),
            colony,
            cursor: hit.position,
            cursor_index: 0,
            iteration: 0,
            phase: GrowthPhase::Seeded,
            blocked_iterations: 0,
            candidates_evaluated: 0,
            candidates_rejected: 0,
        })
    }

    pub fn config(&self) -> &GrowthConfig {
        self.config
    }

    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    /// Current growth origin.
    pub fn cursor(&self) -> Vec3 {
        self.cursor
    }

    /// Colony index of the module the cursor sits on.
    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    /// Number of decision iterations performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn phase(&self) -> GrowthPhase {
        self.phase
    }

    pub fn blocked_iterations(&self) -> usize {
        self.blocked_iterations
    }

    /// Senses around the cursor and returns the accepted candidates in
    /// direction order, reporting each rejection to `sink`.
    fn sense(&mut self, sink: &mut dyn EventSink) -> Vec<Candidate> {
        let evaluator = ConstraintEvaluator::new(self.config, self.oracle);
        let mut accepted = Vec::with_capacity(self.directions.len());

        for (direction_index, offset) in self.directions.iter().enumerate() {
            self.candidates_evaluated += 1;
            match evaluator.evaluate_offset(self.cursor, direction_index, offset, &self.colony) {
                Ok(candidate) => accepted.push(candidate),
                Err(reason) => {
                    self.candidates_rejected += 1;
                    if sink.wants(GrowthEventKind::CandidateRejected) {
                        sink.send(GrowthEvent::CandidateRejected {
                            iteration: self.iteration,
                            direction_index,
                            raw: self.cursor + offset,
                            reason,
                        });
                    }
                }
            }
        }

        accepted
    }

    /// Performs one decision iteration.
    ///
    /// The only randomness is the backtracking choice, drawn from `rng`.
    /// Returns `None` without touching the colony once the simulation has
    /// terminated.
    pub fn step<R: RngCore + ?Sized>(
        &mut self,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Option<StepOutcome> {
        if self.phase == GrowthPhase::Terminated {
            return None;
        }
        self.iteration += 1;
        let accepted = self.sense(sink);

        let selection = pick_most_sun_aligned(
            accepted.iter().map(|c| c.position),
            self.cursor,
            self.config.sun_vector(),
        );

        match selection {
            Some(sel) => {
                let winner = accepted[sel.index];
                let module = Module {
                    position: winner.position,
                    normal: winner.normal,
                    creation_index: self.iteration,
                };
                let colony_index = self.colony.push(module);
                self.cursor = winner.position;
                self.cursor_index = colony_index;
                self.phase = GrowthPhase::Growing;

                debug!(
                    "Iteration {}: placed module {} at {} (direction {}, score {:.3}).",
                    self.iteration, colony_index, winner.position, winner.direction_index, sel.score
                );
                if sink.wants(GrowthEventKind::ModulePlaced) {
                    sink.send(GrowthEvent::ModulePlaced {
                        colony_index,
                        module,
                        direction_index: winner.direction_index,
                        score: sel.score,
                        accepted: accepted.len(),
                    });
                }

                Some(StepOutcome::Grew {
                    colony_index,
                    direction_index: winner.direction_index,
                    score: sel.score,
                })
            }
            None => {
                let cursor_index = uniform_index(rng, self.colony.len());
                self.cursor = self.colony.modules()[cursor_index].position;
                self.cursor_index = cursor_index;
                self.blocked_iterations += 1;
                self.phase = GrowthPhase::Blocked;

                debug!(
                    "Iteration {}: blocked, backtracking to module {}.",
                    self.iteration, cursor_index
                );
                if sink.wants(GrowthEventKind::Blocked) {
                    sink.send(GrowthEvent::Blocked {
                        iteration: self.iteration,
                        cursor_index,
                        cursor: self.cursor,
                    });
                }

                Some(StepOutcome::Blocked { cursor_index })
            }
        }
    }

    /// Runs iterations until `max_modules` have been performed in total, then
    /// terminates. Further steps are refused.
    pub fn run_until<R: RngCore + ?Sized>(
        &mut self,
        max_modules: usize,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) {
        while self.iteration < max_modules {
            if self.step(rng, sink).is_none() {
                return;
            }
        }
        self.phase = GrowthPhase::Terminated;
    }

    /// Ends the simulation and returns its result.
    pub fn finish(self, sink: &mut dyn EventSink) -> RunResult {
        info!(
            "Growth complete: {} modules after {} iterations ({} blocked).",
            self.colony.len(),
            self.iteration,
            self.blocked_iterations
        );
        if self.iteration > 0 && self.blocked_iterations == self.iteration {
            warn!(
                "Every one of {} iterations was blocked; the colony never grew past its seed.",
                self.iteration
            );
        }
        if sink.wants(GrowthEventKind::Terminated) {
            sink.send(GrowthEvent::Terminated {
                iterations: self.iteration,
                blocked_iterations: self.blocked_iterations,
                colony_size: self.colony.len(),
            });
        }

        RunResult {
            colony: self.colony,
            iterations: self.iteration,
            blocked_iterations: self.blocked_iterations,
            candidates_evaluated: self.candidates_evaluated,
            candidates_rejected: self.candidates_rejected,
        }
    }
}

/// Uniform index in `0..len` from the top bits of a 32-bit draw.
fn uniform_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    let scaled = (u64::from(rng.next_u32()) * len as u64) >> 32;
    (scaled as usize).min(len - 1)
}

/// Runs growth simulations with a fixed configuration over a borrowed surface.
pub struct GrowthRunner<'a, O: GeometryOracle + ?Sized> {
    /// Configuration applied to every run.
    pub config: GrowthConfig,
    /// Surface used to ground seeds and candidates.
    pub oracle: &'a O,
}

impl<'a, O: GeometryOracle + ?Sized> GrowthRunner<'a, O> {
    pub fn new(config: GrowthConfig, oracle: &'a O) -> Self {
        Self { config, oracle }
    }

    /// Builds a runner from unvalidated parameters.
    pub fn try_new(config: GrowthConfigBuilder, oracle: &'a O) -> Result<Self> {
        Ok(Self {
            config: config.build()?,
            oracle,
        })
    }

    /// Grows a colony from `seed_point` for `max_modules` iterations.
    pub fn run(
        &self,
        seed_point: Vec3,
        max_modules: usize,
        rng: &mut impl RngCore,
    ) -> Result<RunResult> {
        run_growth(self.oracle, &self.config, seed_point, max_modules, rng, None)
    }

    pub fn run_with_events(
        &self,
        seed_point: Vec3,
        max_modules: usize,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<RunResult> {
        run_growth(
            self.oracle,
            &self.config,
            seed_point,
            max_modules,
            rng,
            Some(sink),
        )
    }
}

/// Seeds, iterates `max_modules` times, and terminates.
pub fn run_growth<O, R>(
    oracle: &O,
    config: &GrowthConfig,
    seed_point: Vec3,
    max_modules: usize,
    rng: &mut R,
    sink: Option<&mut dyn EventSink>,
) -> Result<RunResult>
where
    O: GeometryOracle + ?Sized,
    R: RngCore + ?Sized,
{
    match sink {
        Some(s) => run_growth_with_events(oracle, config, seed_point, max_modules, rng, s),
        None => run_growth_with_events(oracle, config, seed_point, max_modules, rng, &mut ()),
    }
}

pub fn run_growth_with_events<O, R>(
    oracle: &O,
    config: &GrowthConfig,
    seed_point: Vec3,
    max_modules: usize,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<RunResult>
where
    O: GeometryOracle + ?Sized,
    R: RngCore + ?Sized,
{
    if max_modules == 0 {
        warn!("Growth budget is zero; the colony will contain only the seed.");
    }
    let mut sim = GrowthSimulation::seed_with_events(oracle, config, seed_point, sink)?;
    sim.run_until(max_modules, rng, sink);
    Ok(sim.finish(sink))
}

/// Grows a colony and returns module positions ordered by creation index.
///
/// Positions are returned as [`mint::Vector3`] so hosts can convert them into
/// their own math types.
pub fn run_simulation<O, R>(
    surface: &O,
    seed_point: impl Into<Vec3>,
    max_modules: usize,
    config: &GrowthConfig,
    rng: &mut R,
) -> Result<Vec<mint::Vector3<f32>>>
where
    O: GeometryOracle + ?Sized,
    R: RngCore + ?Sized,
{
    let result = run_growth(surface, config, seed_point.into(), max_modules, rng, None)?;
    Ok(result
        .colony
        .iter()
        .map(|m| m.position.into())
        .collect())
}
