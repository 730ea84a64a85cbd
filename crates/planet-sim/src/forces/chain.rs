//! Springs between neighbouring planets only, forming a string

use std::f64::consts::TAU;

use nalgebra::Vector2;

use crate::config::{ChainConstants, SpringTopology};
use crate::forces::elastic::SpringNetwork;
use crate::forces::{ElasticTuning, ForceModel};
use crate::planet::{Planet, PlanetState};

/// Planet `i` is joined to `i - 1` and `i + 1` by damped springs.
///
/// With orientation tracking on, each planet's `ring_angle` is kept bisecting
/// the directions to its two neighbours. The angle is display state only and
/// never produces a force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticChain {
    springs: SpringNetwork,
    tension: f64,
    track_orientation: bool,
}

impl ElasticChain {
    pub fn new(constants: ChainConstants) -> Self {
        Self {
            springs: SpringNetwork::new(constants.spring, SpringTopology::Chain),
            tension: constants.tension,
            track_orientation: constants.track_orientation,
        }
    }

    pub fn constants(&self) -> ChainConstants {
        ChainConstants {
            spring: self.springs.constants,
            tension: self.tension,
            track_orientation: self.track_orientation,
        }
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    pub fn set_tension(&mut self, tension: f64) {
        self.tension = tension;
    }

    pub fn tracks_orientation(&self) -> bool {
        self.track_orientation
    }

    pub fn set_track_orientation(&mut self, enabled: bool) {
        self.track_orientation = enabled;
    }
}

/// Direction from `from` to `to`, in `[0, 2π)`.
fn heading(from: &PlanetState, to: &PlanetState) -> f64 {
    let delta = to.position - from.position;
    delta.y.atan2(delta.x).rem_euclid(TAU)
}

/// Sets each `ring_angle` to bisect the headings towards both neighbours.
/// End links copy the angle of their only neighbour.
pub fn update_ring_angles(states: &mut [PlanetState]) {
    let count = states.len();
    if count < 2 {
        return;
    }
    if count == 2 {
        let angle = heading(&states[0], &states[1]);
        states[0].ring_angle = angle;
        states[1].ring_angle = angle;
        return;
    }

    for i in 1..count - 1 {
        let backward = heading(&states[i], &states[i - 1]);
        let forward = heading(&states[i], &states[i + 1]);
        states[i].ring_angle = 0.5 * (backward + forward);
    }
    states[0].ring_angle = states[1].ring_angle;
    states[count - 1].ring_angle = states[count - 2].ring_angle;
}

impl ForceModel for ElasticChain {
    fn name(&self) -> &'static str {
        "elastic chain"
    }

    fn accumulate(&self, planets: &[Planet], states: &[PlanetState], out: &mut [Vector2<f64>]) {
        self.springs.accumulate(planets, states, out, true);
        self.springs.apply_friction(states, out);
    }

    fn potential_energy(&self, _planets: &[Planet], states: &[PlanetState]) -> f64 {
        self.springs.potential_energy(states)
    }

    fn update_diagnostics(&self, states: &mut [PlanetState]) {
        if self.track_orientation {
            update_ring_angles(states);
        }
    }
}

impl ElasticTuning for ElasticChain {
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
