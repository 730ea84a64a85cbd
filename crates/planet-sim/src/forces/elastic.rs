//! Hookean springs between planets
//!
//! Each spring pulls its two ends together when stretched past the resting
//! distance and pushes them apart when compressed, with magnitude
//! `k·(r - r0)` along the line of centers.

use nalgebra::{Point2, Vector2};

use crate::config::{ElasticConstants, SpringTopology};
use crate::forces::{ElasticTuning, ForceModel};
use crate::planet::{Planet, PlanetState};

/// Visits every spring of `topology` over `count` planets.
pub fn for_each_spring(topology: SpringTopology, count: usize, mut visit: impl FnMut(usize, usize)) {
    match topology {
        SpringTopology::Mesh => {
            for i in 0..count {
                for j in (i + 1)..count {
                    visit(i, j);
                }
            }
        }
        SpringTopology::Chain => {
            for j in 1..count {
                visit(j - 1, j);
            }
        }
    }
}

/// Force on the planet at `from` exerted by a spring attached to `to`.
///
/// Coincident ends give NaN; the singularity is not clamped.
pub fn spring_force(elastic: f64, resting_distance: f64, from: Point2<f64>, to: Point2<f64>) -> Vector2<f64> {
    let delta = to - from;
    let distance = delta.magnitude();
    delta * (elastic * (distance - resting_distance) / distance)
}

/// A set of identical springs laid out by a topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringNetwork {
    pub constants: ElasticConstants,
    pub topology: SpringTopology,
}

impl SpringNetwork {
    pub fn new(constants: ElasticConstants, topology: SpringTopology) -> Self {
        Self { constants, topology }
    }

    /// Overwrites `out` with the net spring force on each planet, divided by
    /// its mass when `per_mass` is set.
    pub fn accumulate(
        &self,
        planets: &[Planet],
        states: &[PlanetState],
        out: &mut [Vector2<f64>],
        per_mass: bool,
    ) {
        out.iter_mut().for_each(|slot| *slot = Vector2::zeros());

        let ElasticConstants {
            elastic,
            resting_distance,
            ..
        } = self.constants;

        for_each_spring(self.topology, states.len(), |i, j| {
            let force = spring_force(elastic, resting_distance, states[i].position, states[j].position);
            if per_mass {
                out[i] += force / planets[i].mass;
                out[j] -= force / planets[j].mass;
            } else {
                out[i] += force;
                out[j] -= force;
            }
        });
    }

    /// `Σ ½·k·(r - r0)²` over every spring.
    pub fn potential_energy(&self, states: &[PlanetState]) -> f64 {
        let ElasticConstants {
            elastic,
            resting_distance,
            ..
        } = self.constants;

        let mut energy = 0.0;
        for_each_spring(self.topology, states.len(), |i, j| {
            let stretch = states[i].distance_to(&states[j]) - resting_distance;
            energy += 0.5 * elastic * stretch * stretch;
        });
        energy
    }

    /// `a -= v·friction` on every planet.
    pub fn apply_friction(&self, states: &[PlanetState], out: &mut [Vector2<f64>]) {
        let friction = self.constants.friction;
        for (slot, state) in out.iter_mut().zip(states) {
            *slot -= state.velocity * friction;
        }
    }
}

impl ElasticTuning for SpringNetwork {
    fn elastic_constant(&self) -> f64 {
        self.constants.elastic
    }

    fn set_elastic_constant(&mut self, elastic: f64) {
        self.constants.elastic = elastic;
    }

    fn resting_distance(&self) -> f64 {
        self.constants.resting_distance
    }

    fn set_resting_distance(&mut self, resting_distance: f64) {
        self.constants.resting_distance = resting_distance;
    }

    fn friction(&self) -> f64 {
        self.constants.friction
    }

    fn set_friction(&mut self, friction: f64) {
        self.constants.friction = friction;
    }
}

/// Every pair of planets joined by a damped spring.
///
/// # Examples
///
/// ```
/// use nalgebra::Vector2;
/// use planet_sim::config::ElasticConstants;
/// use planet_sim::forces::{ElasticMesh, ForceModel};
/// use planet_sim::planet::Planet;
///
/// let mesh = ElasticMesh::new(ElasticConstants {
///     elastic: 2.0,
///     resting_distance: 1.0,
///     friction: 0.0,
/// });
/// let planets = [Planet::new(0.0, 0.0), Planet::new(2.0, 0.0)];
/// let states: Vec<_> = planets.iter().map(Planet::initial_state).collect();
/// let mut out = vec![Vector2::zeros(); 2];
/// mesh.accumulate(&planets, &states, &mut out);
///
/// // stretched by 1, so each end is pulled inward with 2·1 = 2
/// assert_eq!(out[0], Vector2::new(2.0, 0.0));
/// assert_eq!(out[1], Vector2::new(-2.0, 0.0));
/// assert_eq!(mesh.potential_energy(&planets, &states), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticMesh {
    springs: SpringNetwork,
}

impl ElasticMesh {
    pub fn new(constants: ElasticConstants) -> Self {
        Self {
            springs: SpringNetwork::new(constants, SpringTopology::Mesh),
        }
    }

    pub fn constants(&self) -> ElasticConstants {
        self.springs.constants
    }
}

impl ForceModel for ElasticMesh {
    fn name(&self) -> &'static str {
        "elastic mesh"
    }

    fn accumulate(&self, planets: &[Planet], states: &[PlanetState], out: &mut [Vector2<f64>]) {
        self.springs.accumulate(planets, states, out, true);
        self.springs.apply_friction(states, out);
    }

    fn potential_energy(&self, _planets: &[Planet], states: &[PlanetState]) -> f64 {
        self.springs.potential_energy(states)
    }
}

impl ElasticTuning for ElasticMesh {
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
