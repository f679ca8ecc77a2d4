//! Event types and sinks for observing growth runs.
//!
//! This module defines [`GrowthEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while stepping a
//! [`crate::growth::driver::GrowthSimulation`] or running a
//! [`crate::growth::driver::GrowthRunner`]. Sinks never influence the outcome of
//! a run.
use glam::Vec3;

use crate::growth::constraints::Rejection;
use crate::growth::Module;

/// Describes events emitted during a growth run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GrowthEvent {
    /// Emitted once the seed has been grounded.
    Seeded {
        /// Seed point as supplied by the caller.
        requested: Vec3,
        /// The grounded seed module.
        module: Module,
    },

    /// Emitted for each sensing direction whose candidate was discarded.
    CandidateRejected {
        /// Iteration during which the candidate was sensed.
        iteration: usize,
        /// Position in the sensing pattern.
        direction_index: usize,
        /// Raw (ungrounded) candidate point.
        raw: Vec3,
        /// Reason for rejection.
        reason: Rejection,
    },

    /// Emitted when a module is appended to the colony.
    ModulePlaced {
        /// Index of the new module in the colony.
        colony_index: usize,
        /// The placed module.
        module: Module,
        /// Position in the sensing pattern of the winning direction.
        direction_index: usize,
        /// Solar alignment score of the winner.
        score: f32,
        /// Number of candidates that passed all constraints this iteration.
        accepted: usize,
    },

    /// Emitted when every candidate was rejected and the cursor jumped back.
    Blocked {
        /// Iteration that was blocked.
        iteration: usize,
        /// Colony index the cursor now sits on.
        cursor_index: usize,
        /// Cursor position after backtracking.
        cursor: Vec3,
    },

    /// Emitted once the attempt budget is exhausted.
    Terminated {
        /// Number of iterations performed.
        iterations: usize,
        /// Number of iterations that ended blocked.
        blocked_iterations: usize,
        /// Final colony size, seed included.
        colony_size: usize,
    },
}

/// Discriminant of a [`GrowthEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthEventKind {
    Seeded,
    CandidateRejected,
    ModulePlaced,
    Blocked,
    Terminated,
}

impl GrowthEvent {
    pub fn kind(&self) -> GrowthEventKind {
        match self {
            GrowthEvent::Seeded { .. } => GrowthEventKind::Seeded,
            GrowthEvent::CandidateRejected { .. } => GrowthEventKind::CandidateRejected,
            GrowthEvent::ModulePlaced { .. } => GrowthEventKind::ModulePlaced,
            GrowthEvent::Blocked { .. } => GrowthEventKind::Blocked,
            GrowthEvent::Terminated { .. } => GrowthEventKind::Terminated,
        }
    }
}

/// A generic event sink that accepts [`GrowthEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GrowthEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: GrowthEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GrowthEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GrowthEvent) {}

    #[inline]
    fn wants(&self, _kind: GrowthEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GrowthEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GrowthEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GrowthEvent),
{
    #[inline]
    fn send(&mut self, event: GrowthEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GrowthEvent>,
    only: Option<Vec<GrowthEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collects only events of the listed kinds.
    pub fn only(kinds: impl IntoIterator<Item = GrowthEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<GrowthEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GrowthEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GrowthEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: GrowthEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_sinks(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GrowthEvent) {
        let kind = event.kind();
        let mut targets = self.sinks.iter_mut().filter(|s| s.wants(kind)).peekable();
        while let Some(sink) = targets.next() {
            if targets.peek().is_some() {
                sink.send(event.clone());
            } else {
                sink.send(event);
                break;
            }
        }
    }

    fn wants(&self, kind: GrowthEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked(iteration: usize) -> GrowthEvent {
        GrowthEvent::Blocked {
            iteration,
            cursor_index: 0,
            cursor: Vec3::ZERO,
        }
    }

    fn terminated() -> GrowthEvent {
        GrowthEvent::Terminated {
            iterations: 1,
            blocked_iterations: 1,
            colony_size: 1,
        }
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(GrowthEventKind::ModulePlaced));
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::with_capacity(2);
        assert!(sink.is_empty());
        sink.send(blocked(1));
        sink.send(blocked(2));
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn vec_sink_filters_by_kind() {
        let mut sink = VecSink::only([GrowthEventKind::Terminated]);
        assert!(!sink.wants(GrowthEventKind::Blocked));
        sink.send_many([blocked(1), terminated()]);
        let events = sink.into_inner();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), GrowthEventKind::Terminated);
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![
            VecSink::new(),
            VecSink::only([GrowthEventKind::Terminated]),
        ]);
        multi.send(blocked(3));
        multi.send(terminated());
        assert_eq!(multi.len(), 2);
        let sinks = multi.into_sinks();
        assert_eq!(sinks[0].len(), 2);
        assert_eq!(sinks[1].len(), 1);
    }

    #[test]
    fn multi_sink_built_incrementally_wants_union_of_kinds() {
        let mut multi: MultiSink<VecSink> = MultiSink::default();
        assert!(multi.is_empty());
        assert!(!multi.wants(GrowthEventKind::Blocked));

        multi.push(VecSink::only([GrowthEventKind::Blocked]));
        multi.push(VecSink::only([GrowthEventKind::Terminated]));
        assert!(multi.wants(GrowthEventKind::Blocked));
        assert!(!multi.wants(GrowthEventKind::Seeded));

        multi.send(blocked(1));
        let sinks = multi.into_sinks();
        assert_eq!(sinks[0].len(), 1);
        assert!(sinks[1].is_empty());
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(blocked(1));
        sink.send(terminated());
        assert_eq!(count, 2);
    }
}
