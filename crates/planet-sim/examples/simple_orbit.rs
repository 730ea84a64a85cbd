//! Two-body circular orbit
//!
//! Runs two equal masses around their common center and prints the energy
//! drift once per simulated time unit.
//!
//! Run with: cargo run --package planet-sim --example simple_orbit

use planet_sim::diagnostics::{EnergyHistory, EnergySample};
use planet_sim::scenarios::two_body_orbit;
use planet_sim::Simulator;
use tracing_subscriber::EnvFilter;

/// `-G·m1·m2/r`; the gravity model itself reports no potential energy.
fn gravitational_potential(simulator: &Simulator) -> f64 {
    let planets = simulator.planets();
    let states = simulator.states();
    -planets[0].mass * planets[1].mass / states[0].distance_to(&states[1])
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Two-body orbit\n");
    println!("{}", "=".repeat(60));

    let config = two_body_orbit(2.0, 1.0);
    let mut simulator = match Simulator::new(config) {
        Ok(simulator) => simulator,
        Err(error) => {
            eprintln!("invalid configuration: {}", error);
            return;
        }
    };

    let steps_per_unit = (1.0 / simulator.dt()).round() as u64;
    let units = 12;
    let mut history = EnergyHistory::with_capacity(units + 1);
    let sample = |simulator: &Simulator| EnergySample {
        potential: gravitational_potential(simulator),
        ..simulator.energy_sample()
    };

    let initial = sample(&simulator);
    history.push(initial);
    println!("  dt: {:.3e}", simulator.dt());
    println!("  Initial energy: {:.9}", initial.total());
    println!();

    for _ in 0..units {
        for _ in 0..steps_per_unit {
            simulator.step();
        }
        let current = sample(&simulator);
        history.push(current);

        let states = simulator.states();
        println!(
            "t={:6.2}  separation={:.6}  E={:.9}  drift={:+.3e}",
            current.time,
            states[0].distance_to(&states[1]),
            current.total(),
            (current.total() - initial.total()) / initial.total().abs()
        );
    }

    println!("\n{}", "=".repeat(60));
    println!(
        "Max relative energy deviation: {:.3e}",
        history.max_deviation() / initial.total().abs()
    );
    let momentum = simulator.total_momentum();
    println!("Total momentum: ({:.3e}, {:.3e})", momentum.x, momentum.y);
}
