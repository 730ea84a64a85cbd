use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::diagnostics::{kinetic_energy, total_momentum, EnergyHistory, EnergySample};
use crate::planet::{Planet, PlanetState};

fn sample(step: u64, kinetic: f64, potential: f64) -> EnergySample {
    EnergySample {
        step,
        time: step as f64 * 0.1,
        kinetic,
        potential,
    }
}

#[test]
fn test_kinetic_energy_sums_bodies() {
    let planets = [
        Planet::new(0.0, 0.0).with_mass(2.0).with_velocity(3.0, 4.0),
        Planet::new(1.0, 0.0).with_velocity(0.0, -2.0),
    ];
    let states: Vec<PlanetState> = planets.iter().map(Planet::initial_state).collect();

    assert_relative_eq!(kinetic_energy(&planets, &states), 25.0 + 2.0);
}

#[test]
fn test_total_momentum_sums_bodies() {
    let planets = [
        Planet::new(0.0, 0.0).with_mass(2.0).with_velocity(1.0, 0.0),
        Planet::new(1.0, 0.0).with_mass(0.5).with_velocity(-4.0, 2.0),
    ];
    let states: Vec<PlanetState> = planets.iter().map(Planet::initial_state).collect();

    assert_relative_eq!(total_momentum(&planets, &states), Vector2::new(0.0, 1.0));
}

#[test]
fn test_history_drops_oldest_when_full() {
    let mut history = EnergyHistory::with_capacity(3);
    for step in 0..5 {
        history.push(sample(step, 1.0, 0.0));
    }

    let steps: Vec<u64> = history.iter().map(|s| s.step).collect();
    assert_eq!(steps, vec![2, 3, 4]);
    assert_eq!(history.latest().map(|s| s.step), Some(4));
}

#[test]
fn test_history_deviation_from_first_sample() {
    let mut history = EnergyHistory::with_capacity(8);
    assert_eq!(history.max_deviation(), 0.0);

    history.push(sample(0, 1.0, -2.0));
    history.push(sample(1, 1.5, -2.0));
    history.push(sample(2, 0.75, -2.0));

    assert_relative_eq!(history.max_deviation(), 0.5);
    history.clear();
    assert!(history.is_empty());
}
