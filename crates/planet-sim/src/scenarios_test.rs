use approx::assert_relative_eq;
use nalgebra::Vector2;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::config::{ChainConstants, ForceConfig};
use crate::diagnostics::total_momentum;
use crate::planet::{Planet, PlanetState};
use crate::scenarios::{charged_line, elastic_string, head_on_pair, random_cloud, two_body_orbit};
use crate::simulator::Simulator;

fn initial_states(planets: &[Planet]) -> Vec<PlanetState> {
    planets.iter().map(Planet::initial_state).collect()
}

#[test]
fn test_two_body_orbit_has_no_net_momentum() {
    let config = two_body_orbit(4.0, 2.0);
    let states = initial_states(&config.planets);

    assert!(config.validate().is_ok());
    assert_relative_eq!(total_momentum(&config.planets, &states), Vector2::zeros());
    // √(G·m / (2·d)) = √(2 / 8)
    assert_relative_eq!(config.planets[1].velocity.y, 0.5);
    assert_relative_eq!(config.planets[0].position.x, -2.0);
}

#[test]
fn test_charged_line_layout() {
    let config = charged_line(4, 3.0);

    assert_eq!(config.planets.len(), 4);
    for (index, planet) in config.planets.iter().enumerate() {
        assert_relative_eq!(planet.position.x, index as f64 * 3.0);
        assert_eq!(planet.charge, -1.0);
        assert_eq!(planet.mass, 1.0);
        assert_eq!(planet.radius, 1.0);
    }
    assert!(matches!(config.force, ForceConfig::Gravity(_)));
}

#[test]
fn test_elastic_string_plucks_the_middle() {
    let config = elastic_string(5, ChainConstants::default(), 0.1);

    assert_eq!(config.planets.len(), 5);
    assert_eq!(config.planets[2].position.y, 0.1);
    assert_eq!(config.planets[0].position.y, 0.0);
    assert_relative_eq!(config.planets[1].position.x, 0.194);

    let mut simulator = Simulator::new(config).unwrap();
    simulator.add_locked_planet(0).unwrap();
    simulator.add_locked_planet(4).unwrap();
    for _ in 0..100 {
        simulator.step();
    }

    assert!(simulator.states()[2].position.y < 0.1);
    assert_eq!(simulator.states()[0].position.y, 0.0);
}

#[test]
fn test_head_on_pair_enables_collisions() {
    let simulator = Simulator::new(head_on_pair(1.0)).unwrap();

    assert!(simulator.collisions_enabled());
    assert_eq!(simulator.states()[0].velocity, Vector2::new(1.0, 0.0));
    assert_eq!(simulator.states()[1].velocity, Vector2::new(-1.0, 0.0));
}

#[test]
fn test_random_cloud_is_seeded() {
    let first = random_cloud(&mut ChaChaRng::seed_from_u64(42), 32, 5.0, 1.0);
    let again = random_cloud(&mut ChaChaRng::seed_from_u64(42), 32, 5.0, 1.0);
    let other = random_cloud(&mut ChaChaRng::seed_from_u64(43), 32, 5.0, 1.0);

    assert_eq!(first, again);
    assert_ne!(first, other);
}

#[test]
fn test_random_cloud_bounds() {
    let config = random_cloud(&mut ChaChaRng::seed_from_u64(1), 100, 5.0, 1.0);

    assert_eq!(config.planets.len(), 100);
    assert!(config.validate().is_ok());
    for planet in &config.planets {
        assert!(planet.position.coords.magnitude() <= 5.0 + 1e-12);
        assert!(planet.velocity.magnitude() <= 1.0 + 1e-12);
        assert!((0.5..2.0).contains(&planet.mass));
    }
}
