//! Spring field integrated with the Verlet recurrence

use nalgebra::Vector2;

use crate::config::{ElasticConstants, FieldConstants, SpringTopology};
use crate::forces::elastic::SpringNetwork;
use crate::forces::{ElasticTuning, ForceModel, ForceOutput};
use crate::planet::{Planet, PlanetState};

/// Springs laid out by a topology, producing net forces rather than
/// accelerations.
///
/// Division by mass and the optional linear drag both happen inside the
/// Verlet integrator; friction is reported through [`ForceModel::drag`]
/// rather than applied here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticField {
    springs: SpringNetwork,
}

impl ElasticField {
    pub fn new(constants: FieldConstants) -> Self {
        let spring = ElasticConstants {
            elastic: constants.elastic,
            resting_distance: constants.resting_distance,
            friction: constants.friction,
        };
        Self {
            springs: SpringNetwork::new(spring, constants.topology),
        }
    }

    pub fn topology(&self) -> SpringTopology {
        self.springs.topology
    }

    pub fn constants(&self) -> FieldConstants {
        FieldConstants {
            elastic: self.springs.constants.elastic,
            resting_distance: self.springs.constants.resting_distance,
            friction: self.springs.constants.friction,
            topology: self.springs.topology,
        }
    }
}

impl ForceModel for ElasticField {
    fn name(&self) -> &'static str {
        "elastic field"
    }

    fn output(&self) -> ForceOutput {
        ForceOutput::Force
    }

    fn accumulate(&self, planets: &[Planet], states: &[PlanetState], out: &mut [Vector2<f64>]) {
        self.springs.accumulate(planets, states, out, false);
    }

    fn potential_energy(&self, _planets: &[Planet], states: &[PlanetState]) -> f64 {
        self.springs.potential_energy(states)
    }

    fn drag(&self) -> f64 {
        self.springs.constants.friction
    }
}

impl ElasticTuning for ElasticField {
    fn elastic_constant(&self) -> f64 {
        self.springs.elastic_constant()
    }

    fn set_elastic_constant(&mut self, elastic: f64) {
        self.springs.set_elastic_constant(elastic);
    }

    fn resting_distance(&self) -> f64 {
        self.springs.resting_distance()
    }

    fn set_resting_distance(&mut self, resting_distance: f64) {
        self.springs.set_resting_distance(resting_distance);
    }

    fn friction(&self) -> f64 {
        self.springs.friction()
    }

    fn set_friction(&mut self, friction: f64) {
        self.springs.set_friction(friction);
    }
}
