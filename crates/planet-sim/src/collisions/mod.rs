//! Continuous collision detection and elastic resolution
//!
//! Within one substep every planet follows a constant-acceleration
//! trajectory, so the squared distance between two planets is a quartic in
//! time. The engine finds the earliest instant any pair touches, advances
//! everything to it, bounces the pair, and repeats until the substep is used
//! up.

pub mod detection;
pub mod resolution;


pub use detection::{approach_polynomial, find_earliest_collision};
pub use resolution::resolve_elastic;

use tracing::{debug, warn};

use crate::locked::LockedSet;
use crate::planet::{Planet, PlanetState};

/// Default bound on collisions resolved within one substep.
pub const MAX_COLLISIONS_PER_SLICE: usize = 64;

/// The earliest contact found in the remainder of a substep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Lower planet index
    pub first: usize,
    /// Higher planet index
    pub second: usize,
    /// Time of contact, measured from the current point of the substep
    pub time: f64,
}

/// Where the engine is within one substep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlicePhase {
    /// Looking for the earliest contact in the remaining time
    Searching { remaining: f64 },
    /// Advancing to a contact and bouncing the pair
    Resolving { event: CollisionEvent, remaining: f64 },
    /// The whole substep has been advanced
    Done,
}

/// Runs the search/resolve cycle over one substep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEngine {
    max_per_slice: usize,
}

impl Default for CollisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionEngine {
    pub fn new() -> Self {
        Self {
            max_per_slice: MAX_COLLISIONS_PER_SLICE,
        }
    }

    pub fn with_max_per_slice(mut self, max_per_slice: usize) -> Self {
        self.max_per_slice = max_per_slice;
        self
    }

    pub fn max_per_slice(&self) -> usize {
        self.max_per_slice
    }

    /// Advances `states` through a substep of length `slice`, resolving every
    /// collision on the way.
    ///
    /// `advance` moves all states forward by a given time; accelerations
    /// already in `states` are used for the whole substep.
    ///
    /// # Returns
    ///
    /// Number of collisions resolved
    ///
    /// # Examples
    ///
    /// ```
    /// use planet_sim::collisions::CollisionEngine;
    /// use planet_sim::integrator::drift;
    /// use planet_sim::locked::LockedSet;
    /// use planet_sim::planet::Planet;
    ///
    /// let planets = [
    ///     Planet::new(0.0, 0.0).with_velocity(1.0, 0.0).with_radius(0.5),
    ///     Planet::new(3.0, 0.0).with_velocity(-1.0, 0.0).with_radius(0.5),
    /// ];
    /// let mut states: Vec<_> = planets.iter().map(Planet::initial_state).collect();
    ///
    /// let engine = CollisionEngine::new();
    /// let resolved = engine.run_slice(&planets, &mut states, &LockedSet::new(), 2.0, drift);
    ///
    /// // contact at t = 1, then both travel back for the remaining second
    /// assert_eq!(resolved, 1);
    /// assert!(states[0].position.x.abs() < 1e-9);
    /// assert!((states[0].velocity.x + 1.0).abs() < 1e-9);
    /// ```
    pub fn run_slice(
        &self,
        planets: &[Planet],
        states: &mut [PlanetState],
        locked: &LockedSet,
        slice: f64,
        mut advance: impl FnMut(&mut [PlanetState], f64),
    ) -> usize {
        let mut resolved = 0;
        let mut phase = SlicePhase::Searching { remaining: slice };

        loop {
            phase = match phase {
                SlicePhase::Searching { remaining } if resolved >= self.max_per_slice => {
                    warn!(
                        resolved,
                        remaining, "collision cap reached, finishing substep without collisions"
                    );
                    advance(states, remaining);
                    SlicePhase::Done
                }
                SlicePhase::Searching { remaining } => {
                    match find_earliest_collision(planets, states, remaining) {
                        Some(event) => SlicePhase::Resolving { event, remaining },
                        None => {
                            advance(states, remaining);
                            SlicePhase::Done
                        }
                    }
                }
                SlicePhase::Resolving { event, remaining } => {
                    advance(states, event.time);
                    resolve_elastic(planets, states, locked, &event);
                    resolved += 1;
                    debug!(
                        first = event.first,
                        second = event.second,
                        time = event.time,
                        "collision resolved"
                    );
                    SlicePhase::Searching {
                        remaining: remaining - event.time,
                    }
                }
                SlicePhase::Done => return resolved,
            };
        }
    }
}
