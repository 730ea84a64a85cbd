//! In-memory simulation configuration.
//!
//! A [`SimulationConfig`] is everything a simulator is built from: the planet
//! list, the timing constants and the force model with its constants. The
//! core defines no file format; the serde derives let the caller persist a
//! configuration however it likes.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::planet::Planet;

/// Constants of the gravity + electromagnetic model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConstants {
    /// Gravitational constant `G`
    pub gravity: f64,
    /// Permittivity `ε`; the electric coupling is `1/(4π·ε)`
    pub permittivity: f64,
    /// Permeability `μ`; the magnetic coupling is `μ/(4π)`
    pub permeability: f64,
    /// Run the continuous collision engine every substep
    pub collisions_enabled: bool,
}

impl Default for GravityConstants {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            permittivity: 1.0,
            permeability: 1.0,
            collisions_enabled: false,
        }
    }
}

/// Spring constants shared by the elastic models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticConstants {
    /// Spring stiffness `k`
    pub elastic: f64,
    /// Separation at which a spring exerts no force
    pub resting_distance: f64,
    /// Linear velocity damping
    pub friction: f64,
}

impl Default for ElasticConstants {
    fn default() -> Self {
        Self {
            elastic: 1.364,
            resting_distance: 0.194,
            friction: 0.001,
        }
    }
}

/// Constants of the elastic chain model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConstants {
    pub spring: ElasticConstants,
    /// Carried for editing; does not enter the force law
    pub tension: f64,
    /// Maintain the `ring_angle` orientation of each link
    pub track_orientation: bool,
}

impl Default for ChainConstants {
    fn default() -> Self {
        Self {
            spring: ElasticConstants::default(),
            tension: 1.0,
            track_orientation: false,
        }
    }
}

/// Which pairs of planets a field model connects with springs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpringTopology {
    /// Every unordered pair
    Mesh,
    /// Adjacent indices only
    #[default]
    Chain,
}

/// Constants of the Verlet-integrated elastic field model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConstants {
    pub elastic: f64,
    pub resting_distance: f64,
    /// Linear drag folded into the Verlet recurrence; zero gives plain
    /// Störmer–Verlet
    pub friction: f64,
    pub topology: SpringTopology,
}

impl Default for FieldConstants {
    fn default() -> Self {
        Self {
            elastic: 1.0,
            resting_distance: 0.194,
            friction: 0.0,
            topology: SpringTopology::Chain,
        }
    }
}

/// Force model selection. The variant also fixes the integrator:
/// the field model is advanced with Störmer–Verlet, all others with
/// Euler–Cromer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ForceConfig {
    Gravity(GravityConstants),
    ElasticMesh(ElasticConstants),
    ElasticChain(ChainConstants),
    ElasticField(FieldConstants),
}

impl Default for ForceConfig {
    fn default() -> Self {
        ForceConfig::Gravity(GravityConstants::default())
    }
}

/// Complete description of one simulation run.
///
/// # Examples
///
/// ```
/// use planet_sim::config::{ForceConfig, GravityConstants, SimulationConfig};
/// use planet_sim::planet::Planet;
///
/// let config = SimulationConfig::new(ForceConfig::Gravity(GravityConstants::default()))
///     .with_planet(Planet::new(-1.0, 0.0))
///     .with_planet(Planet::new(1.0, 0.0))
///     .with_frame_rate(50)
///     .with_substeps_per_frame(20);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.substep_dt(), 0.001);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub planets: Vec<Planet>,
    /// Simulated time covered by one rendered frame
    pub time_interval: f64,
    /// Rendered frames per second of wall time
    pub frame_rate: u32,
    /// Physics substeps per rendered frame
    pub substeps_per_frame: u32,
    /// Simulated time after which a stepping loop stops; `None` runs forever
    pub total_time: Option<f64>,
    pub force: ForceConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            planets: Vec::new(),
            time_interval: 1.0,
            frame_rate: 60,
            substeps_per_frame: 100,
            total_time: None,
            force: ForceConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new(force: ForceConfig) -> Self {
        Self {
            force,
            ..Self::default()
        }
    }

    pub fn with_planet(mut self, planet: Planet) -> Self {
        self.planets.push(planet);
        self
    }

    pub fn with_planets(mut self, planets: impl IntoIterator<Item = Planet>) -> Self {
        self.planets.extend(planets);
        self
    }

    pub fn with_time_interval(mut self, time_interval: f64) -> Self {
        self.time_interval = time_interval;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_substeps_per_frame(mut self, substeps: u32) -> Self {
        self.substeps_per_frame = substeps;
        self
    }

    pub fn with_total_time(mut self, total_time: f64) -> Self {
        self.total_time = Some(total_time);
        self
    }

    pub fn with_force(mut self, force: ForceConfig) -> Self {
        self.force = force;
        self
    }

    /// Simulated time advanced by one substep:
    /// `time_interval / (frame_rate · substeps_per_frame)`.
    pub fn substep_dt(&self) -> f64 {
        self.time_interval / (f64::from(self.frame_rate) * f64::from(self.substeps_per_frame))
    }

    /// Rejects configurations that would only produce NaN or infinity.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.time_interval.is_finite() && self.time_interval > 0.0) {
            return Err(SimulationError::InvalidTimeStep(self.time_interval));
        }
        if self.frame_rate == 0 {
            return Err(SimulationError::InvalidFrameRate);
        }
        if self.substeps_per_frame == 0 {
            return Err(SimulationError::InvalidSubsteps);
        }

        for (index, planet) in self.planets.iter().enumerate() {
            if !(planet.mass.is_finite() && planet.mass > 0.0) {
                return Err(SimulationError::InvalidMass {
                    index,
                    mass: planet.mass,
                });
            }
            if !(planet.radius.is_finite() && planet.radius >= 0.0) {
                return Err(SimulationError::InvalidRadius {
                    index,
                    radius: planet.radius,
                });
            }
        }
        Ok(())
    }
}
