use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::planet::{Planet, PlanetState};

#[test]
fn test_planet_defaults() {
    let planet = Planet::new(3.0, -2.0);

    assert_eq!(planet.position, Point2::new(3.0, -2.0));
    assert_eq!(planet.velocity, Vector2::zeros());
    assert_eq!(planet.mass, 1.0);
    assert_eq!(planet.charge, 0.0);
    assert_eq!(planet.radius, 1.0);
    assert_eq!(Planet::default().position, Point2::origin());
}

#[test]
fn test_initial_state_has_no_acceleration() {
    let planet = Planet::new(1.0, 1.0).with_velocity(2.0, 0.0);
    let state = planet.initial_state();

    assert_eq!(state.position, planet.position);
    assert_eq!(state.velocity, planet.velocity);
    assert_eq!(state.acceleration, Vector2::zeros());
    assert_eq!(state.ring_angle, 0.0);
}

#[test]
fn test_momentum_and_kinetic_energy() {
    let planet = Planet::new(0.0, 0.0).with_mass(2.0).with_velocity(3.0, 4.0);
    let state = planet.initial_state();

    assert_eq!(planet.momentum(), Vector2::new(6.0, 8.0));
    assert_eq!(state.momentum(planet.mass), planet.momentum());
    assert_relative_eq!(planet.kinetic_energy(), 25.0);
    assert_relative_eq!(state.kinetic_energy(planet.mass), 25.0);
}

#[test]
fn test_advance_applies_constant_acceleration() {
    let mut state = PlanetState::at_rest(Point2::new(1.0, 0.0));
    state.velocity = Vector2::new(0.0, 2.0);
    state.acceleration = Vector2::new(-1.0, 0.0);

    state.advance(2.0);

    assert_relative_eq!(state.position, Point2::new(-1.0, 4.0));
    assert_relative_eq!(state.velocity, Vector2::new(-2.0, 2.0));
}

#[test]
fn test_pin_keeps_position() {
    let mut state = PlanetState::at_rest(Point2::new(5.0, 5.0));
    state.velocity = Vector2::new(1.0, 1.0);
    state.acceleration = Vector2::new(1.0, 1.0);

    state.pin();

    assert_eq!(state.position, Point2::new(5.0, 5.0));
    assert_eq!(state.velocity, Vector2::zeros());
    assert_eq!(state.acceleration, Vector2::zeros());
}

#[test]
fn test_distance_to() {
    let a = PlanetState::at_rest(Point2::new(0.0, 0.0));
    let b = PlanetState::at_rest(Point2::new(3.0, 4.0));

    assert_relative_eq!(a.distance_to(&b), 5.0);
    assert_relative_eq!(b.distance_to(&a), 5.0);
}
