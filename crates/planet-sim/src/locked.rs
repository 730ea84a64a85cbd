use std::collections::BTreeSet;

use crate::planet::PlanetState;

/// Indices of pinned planets.
///
/// A pinned planet has its velocity and acceleration forced to zero after
/// every force computation, so it stays where it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedSet {
    indices: BTreeSet<usize>,
}

impl LockedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `index`, returning `false` if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Removes `index`, returning `false` if it was not present.
    pub fn remove(&mut self, index: usize) -> bool {
        self.indices.remove(&index)
    }

    /// Flips membership of `index` and returns the new membership.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.insert(index) {
            true
        } else {
            self.indices.remove(&index);
            false
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Zeroes velocity and acceleration of every locked state.
    pub fn pin(&self, states: &mut [PlanetState]) {
        for index in self.iter() {
            if let Some(state) = states.get_mut(index) {
                state.pin();
            }
        }
    }
}
