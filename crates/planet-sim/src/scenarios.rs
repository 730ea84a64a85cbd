//! Ready-made simulation configurations
//!
//! Each builder returns a plain [`SimulationConfig`] that can be adjusted
//! further with the `with_*` methods before constructing a simulator.

use std::f64::consts::PI;

use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::config::{ChainConstants, ForceConfig, GravityConstants, SimulationConfig};
use crate::planet::Planet;

/// Two equal masses on a circular orbit around their common center.
///
/// The bodies sit at `(∓separation/2, 0)` moving in opposite directions
/// along `y` with the circular speed `√(G·m / (2·separation))`.
///
/// # Examples
///
/// ```
/// use planet_sim::scenarios::two_body_orbit;
///
/// let config = two_body_orbit(2.0, 1.0);
///
/// assert_eq!(config.planets.len(), 2);
/// assert_eq!(config.planets[1].velocity.y, 0.5);
/// ```
pub fn two_body_orbit(separation: f64, mass: f64) -> SimulationConfig {
    let constants = GravityConstants::default();
    let speed = (constants.gravity * mass / (2.0 * separation)).sqrt();
    let half = separation / 2.0;

    SimulationConfig::new(ForceConfig::Gravity(constants))
        .with_planet(
            Planet::new(-half, 0.0)
                .with_velocity(0.0, -speed)
                .with_mass(mass)
                .with_radius(0.1),
        )
        .with_planet(
            Planet::new(half, 0.0)
                .with_velocity(0.0, speed)
                .with_mass(mass)
                .with_radius(0.1),
        )
}

/// `count` like-charged planets at rest on the `x` axis, `spacing` apart.
pub fn charged_line(count: usize, spacing: f64) -> SimulationConfig {
    let planets = (0..count).map(|index| {
        Planet::new(index as f64 * spacing, 0.0)
            .with_charge(-1.0)
            .with_mass(1.0)
            .with_radius(1.0)
    });
    SimulationConfig::new(ForceConfig::Gravity(GravityConstants::default())).with_planets(planets)
}

/// A chain of `count` planets along `x` at the resting distance, the middle
/// one displaced by `pluck` along `y`.
///
/// Lock planets `0` and `count - 1` after constructing the simulator to hold
/// the string's ends.
pub fn elastic_string(count: usize, constants: ChainConstants, pluck: f64) -> SimulationConfig {
    let spacing = constants.spring.resting_distance;
    let middle = count / 2;
    let planets = (0..count).map(|index| {
        let y = if index == middle && index != 0 && index + 1 != count {
            pluck
        } else {
            0.0
        };
        Planet::new(index as f64 * spacing, y).with_radius(spacing / 4.0)
    });
    SimulationConfig::new(ForceConfig::ElasticChain(constants)).with_planets(planets)
}

/// Two unit-radius bodies at `(∓4, 0)` closing head on at `speed` each, with
/// collisions enabled and gravity switched off.
///
/// They touch at `t = 3 / speed`.
pub fn head_on_pair(speed: f64) -> SimulationConfig {
    let constants = GravityConstants {
        gravity: 0.0,
        collisions_enabled: true,
        ..GravityConstants::default()
    };
    SimulationConfig::new(ForceConfig::Gravity(constants))
        .with_planet(Planet::new(-4.0, 0.0).with_velocity(speed, 0.0))
        .with_planet(Planet::new(4.0, 0.0).with_velocity(-speed, 0.0))
}

/// `count` uncharged bodies scattered uniformly over the disc of radius
/// `extent`, each moving in a random direction at up to `max_speed`.
///
/// The same seeded `rng` always yields the same cloud.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
/// use planet_sim::scenarios::random_cloud;
///
/// let first = random_cloud(&mut ChaChaRng::seed_from_u64(7), 16, 10.0, 0.5);
/// let second = random_cloud(&mut ChaChaRng::seed_from_u64(7), 16, 10.0, 0.5);
///
/// assert_eq!(first, second);
/// ```
pub fn random_cloud(
    rng: &mut ChaChaRng,
    count: usize,
    extent: f64,
    max_speed: f64,
) -> SimulationConfig {
    let planets: Vec<Planet> = (0..count)
        .map(|_| {
            let radius = extent * rng.gen::<f64>().sqrt();
            let angle = rng.gen_range(0.0..2.0 * PI);
            let heading = rng.gen_range(0.0..2.0 * PI);
            let speed = max_speed * rng.gen::<f64>();
            Planet::new(radius * angle.cos(), radius * angle.sin())
                .with_velocity(speed * heading.cos(), speed * heading.sin())
                .with_mass(rng.gen_range(0.5..2.0))
                .with_radius(0.05)
        })
        .collect();

    SimulationConfig::new(ForceConfig::Gravity(GravityConstants::default())).with_planets(planets)
}
