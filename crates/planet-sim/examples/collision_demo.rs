//! Continuous collision detection
//!
//! A seeded cloud of small bodies with gravity switched off and collisions
//! on, so every bounce is an exact elastic collision.
//!
//! Run with: cargo run --package planet-sim --example collision_demo

use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use planet_sim::config::{ForceConfig, GravityConstants};
use planet_sim::scenarios::{head_on_pair, random_cloud};
use planet_sim::Simulator;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Collision demo\n");
    println!("{}", "=".repeat(60));

    // Head-on pair: contact at t = 3
    let config = head_on_pair(1.0).with_frame_rate(10).with_substeps_per_frame(10);
    let mut simulator = match Simulator::new(config) {
        Ok(simulator) => simulator,
        Err(error) => {
            eprintln!("invalid configuration: {}", error);
            return;
        }
    };
    while simulator.time() < 4.0 {
        simulator.step();
    }
    let states = simulator.states();
    println!("Head-on pair after t={:.2}:", simulator.time());
    for (index, state) in states.iter().enumerate() {
        println!(
            "  Planet {}: x={:+.4}  vx={:+.4}",
            index, state.position.x, state.velocity.x
        );
    }

    // Seeded cloud with collisions
    let mut rng = ChaChaRng::seed_from_u64(2024);
    let mut config = random_cloud(&mut rng, 40, 3.0, 1.0)
        .with_frame_rate(30)
        .with_substeps_per_frame(20);
    config.force = ForceConfig::Gravity(GravityConstants {
        gravity: 0.0,
        collisions_enabled: true,
        ..GravityConstants::default()
    });
    for planet in &mut config.planets {
        planet.radius = 0.15;
    }

    let mut simulator = match Simulator::new(config) {
        Ok(simulator) => simulator,
        Err(error) => {
            eprintln!("invalid configuration: {}", error);
            return;
        }
    };
    let initial_energy = simulator.kinetic_energy();
    let initial_momentum = simulator.total_momentum();

    println!("\nCloud of {} bodies:", simulator.planet_count());
    for second in 1..=5 {
        while simulator.time() < f64::from(second) {
            simulator.step();
        }
        let momentum = simulator.total_momentum() - initial_momentum;
        println!(
            "  t={:4.1}  KE drift={:+.3e}  momentum drift={:.3e}",
            simulator.time(),
            simulator.kinetic_energy() - initial_energy,
            momentum.magnitude()
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Demo complete!");
}
