//! Force models for planet simulations
//!
//! A force model turns the current planet states into one acceleration (or,
//! for the field model, one net force) per body. Every model accumulates
//! pairwise: each interacting pair is visited once and the same contribution
//! is applied to both bodies with opposite sign.

use nalgebra::Vector2;

use crate::config::ForceConfig;
use crate::planet::{Planet, PlanetState};

pub mod chain;
pub mod elastic;
pub mod electromagnetic;
pub mod field;

#[cfg(test)]
mod field_test;

pub use chain::ElasticChain;
pub use elastic::{ElasticMesh, SpringNetwork};
pub use electromagnetic::ElectroGravity;
pub use field::ElasticField;

/// What a force model writes into its output slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceOutput {
    /// Acceleration, already divided by mass
    Acceleration,
    /// Net force; the integrator divides by mass
    Force,
}

impl ForceOutput {
    /// Converts one output slot into an acceleration.
    pub fn to_acceleration(self, value: Vector2<f64>, mass: f64) -> Vector2<f64> {
        match self {
            ForceOutput::Acceleration => value,
            ForceOutput::Force => value / mass,
        }
    }
}

/// A source of acceleration on planets
///
/// # Examples
///
/// ```
/// use nalgebra::Vector2;
/// use planet_sim::config::GravityConstants;
/// use planet_sim::forces::{ElectroGravity, ForceModel};
/// use planet_sim::planet::Planet;
///
/// let planets = [Planet::new(0.0, 0.0), Planet::new(2.0, 0.0)];
/// let states: Vec<_> = planets.iter().map(Planet::initial_state).collect();
/// let mut accelerations = vec![Vector2::zeros(); 2];
///
/// let gravity = ElectroGravity::new(GravityConstants::default());
/// gravity.accumulate(&planets, &states, &mut accelerations);
///
/// assert_eq!(accelerations[0], Vector2::new(0.25, 0.0));
/// assert_eq!(accelerations[1], Vector2::new(-0.25, 0.0));
/// ```
pub trait ForceModel: Send + Sync {
    /// Short stable name used in logs and errors
    fn name(&self) -> &'static str;

    /// Whether `accumulate` produces accelerations or forces
    fn output(&self) -> ForceOutput {
        ForceOutput::Acceleration
    }

    /// Overwrites `out[i]` with the acceleration (or force) on planet `i`
    ///
    /// # Arguments
    ///
    /// * `planets` - Static planet parameters
    /// * `states` - Current estimate of every planet's state
    /// * `out` - One slot per planet, same length as `states`
    fn accumulate(&self, planets: &[Planet], states: &[PlanetState], out: &mut [Vector2<f64>]);

    /// Potential energy of the configuration
    ///
    /// Default implementation returns 0.0. Models without a well-defined
    /// potential keep the default.
    fn potential_energy(&self, _planets: &[Planet], _states: &[PlanetState]) -> f64 {
        0.0
    }

    /// Linear drag the integrator should fold into its update
    fn drag(&self) -> f64 {
        0.0
    }

    /// Refreshes display-only fields of freshly committed states
    fn update_diagnostics(&self, _states: &mut [PlanetState]) {}
}

/// Tunable spring constants, available on the elastic models only
pub trait ElasticTuning {
    fn elastic_constant(&self) -> f64;

    fn set_elastic_constant(&mut self, elastic: f64);

    fn resting_distance(&self) -> f64;

    fn set_resting_distance(&mut self, resting_distance: f64);

    fn friction(&self) -> f64;

    fn set_friction(&mut self, friction: f64);
}

/// The force model a simulator runs, chosen once from its configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ForceModelKind {
    ElectroGravity(ElectroGravity),
    ElasticMesh(ElasticMesh),
    ElasticChain(ElasticChain),
    ElasticField(ElasticField),
}

impl ForceModelKind {
    pub fn from_config(config: &ForceConfig) -> Self {
        match *config {
            ForceConfig::Gravity(constants) => {
                ForceModelKind::ElectroGravity(ElectroGravity::new(constants))
            }
            ForceConfig::ElasticMesh(constants) => {
                ForceModelKind::ElasticMesh(ElasticMesh::new(constants))
            }
            ForceConfig::ElasticChain(constants) => {
                ForceModelKind::ElasticChain(ElasticChain::new(constants))
            }
            ForceConfig::ElasticField(constants) => {
                ForceModelKind::ElasticField(ElasticField::new(constants))
            }
        }
    }

    pub fn as_force_model(&self) -> &dyn ForceModel {
        match self {
            ForceModelKind::ElectroGravity(model) => model,
            ForceModelKind::ElasticMesh(model) => model,
            ForceModelKind::ElasticChain(model) => model,
            ForceModelKind::ElasticField(model) => model,
        }
    }

    /// The tuning capability, if this model has spring constants
    pub fn as_elastic(&self) -> Option<&dyn ElasticTuning> {
        match self {
            ForceModelKind::ElectroGravity(_) => None,
            ForceModelKind::ElasticMesh(model) => Some(model),
            ForceModelKind::ElasticChain(model) => Some(model),
            ForceModelKind::ElasticField(model) => Some(model),
        }
    }

    pub fn as_elastic_mut(&mut self) -> Option<&mut dyn ElasticTuning> {
        match self {
            ForceModelKind::ElectroGravity(_) => None,
            ForceModelKind::ElasticMesh(model) => Some(model),
            ForceModelKind::ElasticChain(model) => Some(model),
            ForceModelKind::ElasticField(model) => Some(model),
        }
    }

    pub fn name(&self) -> &'static str {
        self.as_force_model().name()
    }

    /// True for the gravity model with collisions switched on
    pub fn collisions_enabled(&self) -> bool {
        match self {
            ForceModelKind::ElectroGravity(model) => model.constants().collisions_enabled,
            _ => false,
        }
    }

    /// Whether the model is advanced with the position-only Verlet recurrence
    pub fn uses_verlet(&self) -> bool {
        matches!(self, ForceModelKind::ElasticField(_))
    }
}
