//! The simulator facade: one force model, one integrator, owned state arrays.

use nalgebra::{Point2, Vector2};
use tracing::{debug, info};

use crate::collisions::CollisionEngine;
use crate::config::SimulationConfig;
use crate::diagnostics::{self, EnergySample};
use crate::error::SimulationError;
use crate::forces::{ElasticTuning, ForceModelKind};
use crate::integrator::{EulerCromer, Integrator, StateBuffers, StepContext, StormerVerlet};
use crate::locked::LockedSet;
use crate::planet::{Planet, PlanetState};

/// Advances a set of planets one substep at a time.
///
/// The force model and integrator are picked once, from the configuration:
/// the gravity, mesh and chain models run under Euler–Cromer, the field
/// model under Störmer–Verlet. State arrays are allocated on construction
/// and recycled for the lifetime of the simulator.
///
/// # Examples
///
/// ```
/// use planet_sim::config::{ForceConfig, GravityConstants, SimulationConfig};
/// use planet_sim::planet::Planet;
/// use planet_sim::simulator::Simulator;
///
/// let config = SimulationConfig::new(ForceConfig::Gravity(GravityConstants::default()))
///     .with_planet(Planet::new(-1.0, 0.0).with_velocity(0.0, -0.5))
///     .with_planet(Planet::new(1.0, 0.0).with_velocity(0.0, 0.5));
///
/// let mut simulator = Simulator::new(config).unwrap();
/// let states = simulator.step();
///
/// assert_eq!(states.len(), 2);
/// assert_eq!(simulator.step_count(), 1);
/// ```
pub struct Simulator {
    config: SimulationConfig,
    force: ForceModelKind,
    integrator: Box<dyn Integrator>,
    collisions: Option<CollisionEngine>,
    buffers: StateBuffers,
    locked: LockedSet,
    dt: f64,
    time: f64,
    step_count: u64,
}

impl Simulator {
    /// Validates `config`, allocates the state arrays and bootstraps the
    /// integrator.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let force = ForceModelKind::from_config(&config.force);
        let integrator: Box<dyn Integrator> = if force.uses_verlet() {
            Box::new(StormerVerlet)
        } else {
            Box::new(EulerCromer)
        };
        let collisions = force.collisions_enabled().then(CollisionEngine::new);
        let buffers = StateBuffers::new(&config.planets, integrator.depth());
        let dt = config.substep_dt();

        let mut simulator = Self {
            config,
            force,
            integrator,
            collisions,
            buffers,
            locked: LockedSet::new(),
            dt,
            time: 0.0,
            step_count: 0,
        };
        simulator.bootstrap();

        info!(
            planets = simulator.planet_count(),
            force = simulator.force.name(),
            integrator = simulator.integrator.name(),
            collisions = simulator.collisions.is_some(),
            dt,
            "simulator initialized"
        );
        Ok(simulator)
    }

    fn bootstrap(&mut self) {
        let ctx = StepContext {
            planets: &self.config.planets,
            force: self.force.as_force_model(),
            locked: &self.locked,
            dt: self.dt,
        };
        self.integrator.bootstrap(&mut self.buffers, &ctx);
    }

    /// Advances one substep and returns the newly committed states.
    pub fn step(&mut self) -> &[PlanetState] {
        let ctx = StepContext {
            planets: &self.config.planets,
            force: self.force.as_force_model(),
            locked: &self.locked,
            dt: self.dt,
        };
        self.integrator
            .step(&mut self.buffers, &ctx, self.collisions.as_ref());

        self.time += self.dt;
        self.step_count += 1;
        self.buffers.committed()
    }

    /// Resets every state array to the planets' initial values and
    /// bootstraps again. Locked planets stay locked.
    pub fn restart(&mut self) {
        self.buffers.reset(&self.config.planets);
        self.time = 0.0;
        self.step_count = 0;
        self.bootstrap();
        info!(planets = self.planet_count(), "simulator restarted");
    }

    /// The last committed states.
    pub fn states(&self) -> &[PlanetState] {
        self.buffers.committed()
    }

    pub fn planets(&self) -> &[Planet] {
        &self.config.planets
    }

    pub fn planet_count(&self) -> usize {
        self.config.planets.len()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn force_model(&self) -> &ForceModelKind {
        &self.force
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions.is_some()
    }

    /// Simulated time per substep.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Simulated time since start or the last restart.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// True once the configured total time has elapsed.
    pub fn is_finished(&self) -> bool {
        self.config
            .total_time
            .is_some_and(|total| self.time >= total)
    }

    fn check_index(&self, index: usize) -> Result<(), SimulationError> {
        let count = self.planet_count();
        if index < count {
            Ok(())
        } else {
            Err(SimulationError::PlanetOutOfBounds { index, count })
        }
    }

    pub fn locked(&self) -> &LockedSet {
        &self.locked
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.locked.contains(index)
    }

    /// Pins planet `index` where it is. Returns `Ok(false)` if it was
    /// already locked.
    pub fn add_locked_planet(&mut self, index: usize) -> Result<bool, SimulationError> {
        self.check_index(index)?;
        if !self.locked.insert(index) {
            return Ok(false);
        }
        self.buffers.pin(index);
        debug!(index, "planet locked");
        Ok(true)
    }

    /// Releases planet `index`. Returns `Ok(false)` if it was not locked.
    pub fn remove_locked_planet(&mut self, index: usize) -> Result<bool, SimulationError> {
        self.check_index(index)?;
        let removed = self.locked.remove(index);
        if removed {
            debug!(index, "planet unlocked");
        }
        Ok(removed)
    }

    /// Locks planet `index` if it is free, unlocks it otherwise, and returns
    /// whether it is now locked.
    pub fn toggle_locked_planet(&mut self, index: usize) -> Result<bool, SimulationError> {
        if self.add_locked_planet(index)? {
            Ok(true)
        } else {
            self.remove_locked_planet(index)?;
            Ok(false)
        }
    }

    /// Moves planet `index` to `position` in every state array, bypassing
    /// integration.
    pub fn set_planet_location(
        &mut self,
        index: usize,
        position: Point2<f64>,
    ) -> Result<(), SimulationError> {
        self.check_index(index)?;
        self.buffers.set_position(index, position);
        debug!(index, x = position.x, y = position.y, "planet moved");
        Ok(())
    }

    /// `Σ ½·m·|v|²` over the last committed states.
    pub fn kinetic_energy(&self) -> f64 {
        diagnostics::kinetic_energy(self.planets(), self.states())
    }

    /// Potential energy as defined by the force model. The gravity model
    /// reports zero.
    pub fn potential_energy(&self) -> f64 {
        self.force
            .as_force_model()
            .potential_energy(self.planets(), self.states())
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        diagnostics::total_momentum(self.planets(), self.states())
    }

    pub fn energy_sample(&self) -> EnergySample {
        EnergySample {
            step: self.step_count,
            time: self.time,
            kinetic: self.kinetic_energy(),
            potential: self.potential_energy(),
        }
    }

    /// Spring constants of the elastic models.
    pub fn elastic(&self) -> Option<&dyn ElasticTuning> {
        self.force.as_elastic()
    }

    fn elastic_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut dyn ElasticTuning, SimulationError> {
        let model = self.force.name();
        self.force
            .as_elastic_mut()
            .ok_or(SimulationError::Unsupported { operation, model })
    }

    pub fn set_elastic_constant(&mut self, elastic: f64) -> Result<(), SimulationError> {
        self.elastic_mut("set_elastic_constant")?
            .set_elastic_constant(elastic);
        debug!(elastic, "elastic constant changed");
        Ok(())
    }

    pub fn set_resting_distance(&mut self, resting_distance: f64) -> Result<(), SimulationError> {
        self.elastic_mut("set_resting_distance")?
            .set_resting_distance(resting_distance);
        debug!(resting_distance, "resting distance changed");
        Ok(())
    }

    pub fn set_friction(&mut self, friction: f64) -> Result<(), SimulationError> {
        self.elastic_mut("set_friction")?.set_friction(friction);
        debug!(friction, "friction changed");
        Ok(())
    }
}
