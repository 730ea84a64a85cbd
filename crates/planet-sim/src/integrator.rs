//! Time integration for planet simulations
//!
//! Two schemes are provided and they are not interchangeable: each force
//! model family is tuned for one of them.
//!
//! - [`EulerCromer`] keeps one committed state array and one working array.
//! - [`StormerVerlet`] keeps two committed arrays (the recurrence needs the
//!   last two positions) and one working array.
//!
//! Arrays are allocated once and recycled by rotation on every commit.

use nalgebra::{Point2, Vector2};

use crate::collisions::CollisionEngine;
use crate::forces::ForceModel;
use crate::locked::LockedSet;
use crate::planet::{Planet, PlanetState};

/// Everything an integrator reads during one substep.
pub struct StepContext<'a> {
    pub planets: &'a [Planet],
    pub force: &'a dyn ForceModel,
    pub locked: &'a LockedSet,
    pub dt: f64,
}

/// State arrays owned by a simulator.
///
/// `history` holds committed arrays from oldest to newest; the newest is the
/// one handed out by [`StateBuffers::committed`]. Every array always has one
/// entry per planet.
#[derive(Debug, Clone)]
pub struct StateBuffers {
    history: Vec<Vec<PlanetState>>,
    working: Vec<PlanetState>,
    accumulator: Vec<Vector2<f64>>,
}

impl StateBuffers {
    /// Allocates `depth` committed arrays plus a working array, all holding
    /// the initial states of `planets`.
    pub fn new(planets: &[Planet], depth: usize) -> Self {
        let initial: Vec<PlanetState> = planets.iter().map(Planet::initial_state).collect();
        Self {
            history: vec![initial.clone(); depth.max(1)],
            working: initial,
            accumulator: vec![Vector2::zeros(); planets.len()],
        }
    }

    pub fn planet_count(&self) -> usize {
        self.working.len()
    }

    /// Number of committed arrays kept.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// The newest committed state array.
    pub fn committed(&self) -> &[PlanetState] {
        &self.history[self.history.len() - 1]
    }

    /// Committed array `age` commits back (0 is the newest).
    pub fn committed_at(&self, age: usize) -> Option<&[PlanetState]> {
        let len = self.history.len();
        (age < len).then(|| self.history[len - 1 - age].as_slice())
    }

    /// Overwrites every array with the initial states of `planets` without
    /// reallocating.
    pub fn reset(&mut self, planets: &[Planet]) {
        for buffer in self.history.iter_mut().chain(std::iter::once(&mut self.working)) {
            for (state, planet) in buffer.iter_mut().zip(planets) {
                *state = planet.initial_state();
            }
        }
    }

    /// Moves planet `index` to `position` in every array.
    pub fn set_position(&mut self, index: usize, position: Point2<f64>) {
        for buffer in self.history.iter_mut().chain(std::iter::once(&mut self.working)) {
            buffer[index].position = position;
        }
    }

    /// Pins planet `index` at its committed position in every array.
    pub fn pin(&mut self, index: usize) {
        let position = self.committed()[index].position;
        for buffer in self.history.iter_mut().chain(std::iter::once(&mut self.working)) {
            buffer[index].position = position;
            buffer[index].pin();
        }
    }

    /// Publishes the working array as the newest committed one and recycles
    /// the oldest committed array as the next working array.
    pub fn commit(&mut self) {
        let oldest = self.history.remove(0);
        let fresh = std::mem::replace(&mut self.working, oldest);
        self.history.push(fresh);
    }
}

/// Advances every state by `t` under constant acceleration.
pub fn drift(states: &mut [PlanetState], t: f64) {
    for state in states {
        state.advance(t);
    }
}

/// A time integrator for planet simulations
pub trait Integrator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Committed state arrays the scheme needs.
    fn depth(&self) -> usize;

    /// Prepares freshly reset buffers before the first step.
    fn bootstrap(&self, buffers: &mut StateBuffers, ctx: &StepContext<'_>);

    /// Advances one substep and commits the result.
    ///
    /// # Returns
    ///
    /// Number of collisions resolved during the substep
    fn step(
        &self,
        buffers: &mut StateBuffers,
        ctx: &StepContext<'_>,
        collisions: Option<&CollisionEngine>,
    ) -> usize;
}

/// Semi-implicit Euler
///
/// Per substep, from the committed state:
///
/// 1. `a = F(x, v)` from the force model, then locked planets are pinned
/// 2. `x += v·dt + ½·a·dt²`
/// 3. `v += a·dt`
///
/// When a collision engine is supplied, step 2-3 run in pieces between
/// collision instants.
///
/// # Examples
///
/// ```
/// use planet_sim::config::ElasticConstants;
/// use planet_sim::forces::ElasticMesh;
/// use planet_sim::integrator::{EulerCromer, Integrator, StateBuffers, StepContext};
/// use planet_sim::locked::LockedSet;
/// use planet_sim::planet::Planet;
///
/// let planets = [Planet::new(0.0, 0.0), Planet::new(1.0, 0.0)];
/// let force = ElasticMesh::new(ElasticConstants::default());
/// let locked = LockedSet::new();
/// let ctx = StepContext { planets: &planets, force: &force, locked: &locked, dt: 0.01 };
///
/// let integrator = EulerCromer;
/// let mut buffers = StateBuffers::new(&planets, integrator.depth());
/// integrator.bootstrap(&mut buffers, &ctx);
/// integrator.step(&mut buffers, &ctx, None);
///
/// // the stretched spring pulls the two planets together
/// assert!(buffers.committed()[0].position.x > 0.0);
/// assert!(buffers.committed()[1].position.x < 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerCromer;

impl Integrator for EulerCromer {
    fn name(&self) -> &'static str {
        "euler-cromer"
    }

    fn depth(&self) -> usize {
        1
    }

    fn bootstrap(&self, buffers: &mut StateBuffers, ctx: &StepContext<'_>) {
        for index in ctx.locked.iter() {
            buffers.pin(index);
        }
    }

    fn step(
        &self,
        buffers: &mut StateBuffers,
        ctx: &StepContext<'_>,
        collisions: Option<&CollisionEngine>,
    ) -> usize {
        let StateBuffers {
            history,
            working,
            accumulator,
        } = &mut *buffers;

        working.copy_from_slice(&history[history.len() - 1]);
        ctx.force.accumulate(ctx.planets, working, accumulator);

        let output = ctx.force.output();
        for ((state, value), planet) in working.iter_mut().zip(accumulator.iter()).zip(ctx.planets) {
            state.acceleration = output.to_acceleration(*value, planet.mass);
        }
        ctx.locked.pin(working);

        let resolved = match collisions {
            Some(engine) => engine.run_slice(ctx.planets, working, ctx.locked, ctx.dt, drift),
            None => {
                drift(working, ctx.dt);
                0
            }
        };

        ctx.force.update_diagnostics(working);
        buffers.commit();
        resolved
    }
}

/// Position-only Störmer–Verlet
///
/// `x_next = 2·x_actual - x_last + a·dt²`, with the velocity reconstructed as
/// `(x_next - x_last) / (2·dt)`. A non-zero drag `γ` from the force model is
/// folded in implicitly with `c = γ·dt/m`:
///
/// ```text
/// x_next = (2·dt²·a + 4·x_actual + (c - 2)·x_last) / (c + 2)
/// ```
///
/// which is the plain recurrence when `c = 0`.
///
/// The recurrence needs two past positions, so [`bootstrap`](Integrator::bootstrap)
/// synthesises the second one with a Taylor step from the initial state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StormerVerlet;

impl Integrator for StormerVerlet {
    fn name(&self) -> &'static str {
        "stormer-verlet"
    }

    fn depth(&self) -> usize {
        2
    }

    fn bootstrap(&self, buffers: &mut StateBuffers, ctx: &StepContext<'_>) {
        let StateBuffers {
            history,
            working,
            accumulator,
        } = &mut *buffers;
        let (older, newer) = history.split_at_mut(1);
        let (last, actual) = (&mut older[0], &mut newer[0]);

        ctx.force.accumulate(ctx.planets, last, accumulator);
        let output = ctx.force.output();

        for (index, planet) in ctx.planets.iter().enumerate() {
            let state = &mut last[index];
            state.acceleration = output.to_acceleration(accumulator[index], planet.mass);
            if ctx.locked.contains(index) {
                state.pin();
                actual[index] = *state;
                continue;
            }

            let mut taylor = *state;
            taylor.advance(ctx.dt);
            actual[index] = taylor;
        }

        ctx.force.update_diagnostics(actual);
        working.copy_from_slice(actual);
    }

    fn step(
        &self,
        buffers: &mut StateBuffers,
        ctx: &StepContext<'_>,
        _collisions: Option<&CollisionEngine>,
    ) -> usize {
        let StateBuffers {
            history,
            working: next,
            accumulator,
        } = &mut *buffers;
        let (last, actual) = (&history[0], &history[1]);

        ctx.force.accumulate(ctx.planets, actual, accumulator);

        let output = ctx.force.output();
        let drag = ctx.force.drag();
        let dt = ctx.dt;
        let dt2 = dt * dt;

        for (index, slot) in next.iter_mut().enumerate() {
            let current = actual[index];
            if ctx.locked.contains(index) {
                *slot = current;
                slot.pin();
                continue;
            }

            let mass = ctx.planets[index].mass;
            let acceleration = output.to_acceleration(accumulator[index], mass);
            let x = current.position.coords;
            let previous = last[index].position.coords;

            let damping = drag * dt / mass;
            let position = if damping == 0.0 {
                x * 2.0 - previous + acceleration * dt2
            } else {
                (acceleration * (2.0 * dt2) + x * 4.0 + previous * (damping - 2.0)) / (damping + 2.0)
            };

            *slot = PlanetState {
                position: Point2::from(position),
                velocity: (position - previous) / (2.0 * dt),
                acceleration,
                ..current
            };
        }

        ctx.force.update_diagnostics(next);
        buffers.commit();
        0
    }
}
