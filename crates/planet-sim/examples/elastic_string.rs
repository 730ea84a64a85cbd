//! Plucked elastic string on a background stepping thread
//!
//! Both ends are pinned, the middle is dragged sideways and let go, and the
//! main thread samples published frames while the stepping loop runs.
//!
//! Run with: cargo run --package planet-sim --example elastic_string

use std::thread;
use std::time::Duration;

use nalgebra::Point2;
use planet_sim::config::ChainConstants;
use planet_sim::runner::{Pacing, SteppingLoop};
use planet_sim::scenarios::elastic_string;
use planet_sim::{SharedSimulator, SimulationError};
use tracing_subscriber::EnvFilter;

const LINKS: usize = 21;

fn run() -> Result<(), SimulationError> {
    let constants = ChainConstants {
        track_orientation: true,
        ..ChainConstants::default()
    };
    let config = elastic_string(LINKS, constants, 0.0).with_total_time(3.0);
    let shared = SharedSimulator::from_config(config)?;
    shared.add_locked_planet(0)?;
    shared.add_locked_planet(LINKS - 1)?;

    let pacing = Pacing::from_config(&shared.with_simulator(|simulator| simulator.config().clone())?);
    let stepping = SteppingLoop::spawn(shared.clone(), pacing)?;

    let middle = LINKS / 2;
    let rest = shared.latest().states[middle].position;
    let drag = shared.begin_drag(middle)?;
    for offset in 1..=10 {
        let target = Point2::new(rest.x, rest.y + 0.02 * f64::from(offset));
        drag.move_to(target, Duration::from_millis(250))?;
        thread::sleep(Duration::from_millis(20));
    }
    drag.release()?;
    println!("Released the middle of the string\n");

    while !stepping.is_finished() {
        thread::sleep(Duration::from_millis(250));
        let frame = shared.latest();
        println!(
            "t={:5.3}  middle y={:+.5}  ring angle={:.3}  E={:.6}",
            frame.time,
            frame.states[middle].position.y,
            frame.states[middle].ring_angle,
            frame.total_energy()
        );
    }

    let exit = stepping.join()?;
    println!("\nStepping loop ended: {:?}", exit);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Elastic string\n");
    println!("{}", "=".repeat(60));

    if let Err(error) = run() {
        eprintln!("simulation failed: {}", error);
    }
}
