//! Colony growth: sensing, constraint filtering, solar selection, and backtracking.
use glam::Vec3;

pub mod constraints;
pub mod driver;
pub mod events;
pub mod selection;

/// Attempt budget used when the caller does not pick one.
pub const DEFAULT_MAX_MODULES: usize = 147;

/// A placed habitat unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    /// Grounded surface position.
    pub position: Vec3,
    /// Surface normal at [`Self::position`] when the module was placed.
    pub normal: Vec3,
    /// Iteration that appended this module; `0` for the seed.
    pub creation_index: usize,
}

/// Append-only, growth-ordered collection of modules. The first module is the seed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colony {
    modules: Vec<Module>,
}

impl Colony {
    /// Starts a colony from a grounded seed.
    pub fn new(seed_position: Vec3, seed_normal: Vec3) -> Self {
        Self {
            modules: vec![Module {
                position: seed_position,
                normal: seed_normal,
                creation_index: 0,
            }],
        }
    }

    pub(crate) fn push(&mut self, module: Module) -> usize {
        debug_assert!(
            self.modules
                .last()
                .is_none_or(|m| m.creation_index < module.creation_index),
            "creation indices must increase"
        );
        self.modules.push(module);
        self.modules.len() - 1
    }

    pub fn seed(&self) -> &Module {
        &self.modules[0]
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn get(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Always `false`; a colony holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    /// Module positions in growth order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.modules.iter().map(|m| m.position).collect()
    }

    /// Distance from `point` to the closest module.
    pub fn min_distance_to(&self, point: Vec3) -> f32 {
        self.modules
            .iter()
            .map(|m| m.position.distance_squared(point))
            .fold(f32::INFINITY, f32::min)
            .sqrt()
    }

    pub fn into_modules(self) -> Vec<Module> {
        self.modules
    }
}

impl<'a> IntoIterator for &'a Colony {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
