use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use approx::assert_relative_eq;
use nalgebra::Point2;

use crate::config::{ElasticConstants, ForceConfig, GravityConstants, SimulationConfig};
use crate::error::SimulationError;
use crate::planet::Planet;
use crate::shared::SharedSimulator;

fn mesh() -> SharedSimulator {
    let config = SimulationConfig::new(ForceConfig::ElasticMesh(ElasticConstants::default()))
        .with_planet(Planet::new(0.0, 0.0))
        .with_planet(Planet::new(1.0, 0.0))
        .with_planet(Planet::new(0.0, 1.0));
    SharedSimulator::from_config(config).unwrap()
}

/// Holds the simulator lock on another thread for `hold`.
fn hold_lock(shared: &SharedSimulator, hold: Duration) -> thread::JoinHandle<()> {
    let (acquired, wait) = mpsc::channel();
    let holder = shared.clone();
    let handle = thread::spawn(move || {
        holder
            .with_simulator(|_| {
                acquired.send(()).unwrap();
                thread::sleep(hold);
            })
            .unwrap();
    });
    wait.recv().unwrap();
    handle
}

#[test]
fn test_initial_frame() {
    let shared = mesh();
    let frame = shared.latest();

    assert_eq!(frame.step, 0);
    assert_eq!(frame.sequence, 0);
    assert_eq!(frame.states.len(), 3);
    assert!(!frame.finished);
    assert_eq!(shared.completed_steps(), 0);
}

#[test]
fn test_step_publishes_frame() {
    let shared = mesh();
    let returned = shared.step().unwrap();
    let latest = shared.latest();

    assert_eq!(returned, latest);
    assert_eq!(latest.step, 1);
    assert_eq!(latest.sequence, 1);
    let states = shared.with_simulator(|simulator| simulator.states().to_vec()).unwrap();
    assert_eq!(latest.states, states);
    assert_eq!(latest.total_energy(), latest.kinetic_energy + latest.potential_energy);
}

#[test]
fn test_frame_energies_match_the_simulator() {
    let shared = mesh();
    shared.set_planet_location(1, Point2::new(2.5, 0.0)).unwrap();
    for _ in 0..5 {
        shared.step().unwrap();
    }
    let frame = shared.latest();
    let (kinetic, potential) = shared
        .with_simulator(|simulator| (simulator.kinetic_energy(), simulator.potential_energy()))
        .unwrap();

    assert!(potential > 0.0);
    assert_relative_eq!(frame.kinetic_energy, kinetic, epsilon = 1e-15);
    assert_relative_eq!(frame.potential_energy, potential, epsilon = 1e-15);
}

#[test]
fn test_frame_energies_follow_tuning() {
    let shared = mesh();
    let before = shared.latest().potential_energy;
    shared.set_elastic_constant(2.0 * 1.364).unwrap();

    assert_relative_eq!(shared.latest().potential_energy, 2.0 * before, epsilon = 1e-12);
}

#[test]
fn test_every_write_gets_a_revision() {
    let shared = mesh();
    shared.step().unwrap();
    shared.add_locked_planet(0).unwrap();
    shared.step().unwrap();
    let frame = shared.latest();

    assert_eq!(frame.revision, 3);
    assert_eq!(frame.sequence, 2);
}

#[test]
fn test_published_frames_never_go_backwards() {
    let shared = mesh();
    let done = Arc::new(AtomicBool::new(false));
    let writers: Vec<_> = (0..3)
        .map(|writer| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    if writer == 0 {
                        shared.step().unwrap();
                    } else {
                        shared.set_friction(0.001).unwrap();
                    }
                }
            })
        })
        .collect();

    let reader = {
        let shared = shared.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut last = 0;
            while !done.load(Ordering::Acquire) {
                let revision = shared.latest().revision;
                assert!(revision >= last);
                last = revision;
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Release);
    reader.join().unwrap();

    let frame = shared.latest();
    assert_eq!(frame.revision, 600);
    assert_eq!(frame.sequence, 200);
    assert_eq!(shared.completed_steps(), 200);
}

#[test]
fn test_wait_for_step_times_out_without_stepper() {
    let shared = mesh();

    assert_eq!(
        shared.wait_for_step(0, Duration::from_millis(20)),
        Err(SimulationError::Timeout)
    );
}

#[test]
fn test_wait_for_step_returns_when_already_past() {
    let shared = mesh();
    shared.step().unwrap();
    shared.step().unwrap();

    assert_eq!(shared.wait_for_step(1, Duration::from_millis(1)), Ok(2));
}

#[test]
fn test_wait_for_step_wakes_on_step() {
    let shared = mesh();
    let stepper = shared.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        stepper.step().unwrap();
    });

    assert_eq!(shared.wait_for_step(0, Duration::from_secs(5)), Ok(1));
    handle.join().unwrap();
}

#[test]
fn test_restart_keeps_sequence() {
    let shared = mesh();
    for _ in 0..3 {
        shared.step().unwrap();
    }
    shared.restart().unwrap();
    let frame = shared.latest();

    assert_eq!(frame.step, 0);
    assert_eq!(frame.sequence, 3);
    assert_eq!(frame.states[1].position, Point2::new(1.0, 0.0));
}

#[test]
fn test_mutators_go_through_the_simulator() {
    let shared = mesh();

    assert_eq!(shared.add_locked_planet(1), Ok(true));
    assert_eq!(shared.toggle_locked_planet(1), Ok(false));
    assert_eq!(shared.remove_locked_planet(1), Ok(false));
    assert_eq!(
        shared.add_locked_planet(9),
        Err(SimulationError::PlanetOutOfBounds { index: 9, count: 3 })
    );

    shared.set_elastic_constant(2.0).unwrap();
    shared.set_resting_distance(0.5).unwrap();
    shared.set_friction(0.0).unwrap();
    let elastic = shared
        .with_simulator(|simulator| simulator.elastic().map(|e| e.elastic_constant()))
        .unwrap();
    assert_eq!(elastic, Some(2.0));
}

#[test]
fn test_position_override_is_published() {
    let shared = mesh();
    shared.set_planet_location(2, Point2::new(3.0, 3.0)).unwrap();

    assert_eq!(shared.latest().states[2].position, Point2::new(3.0, 3.0));
}

#[test]
fn test_tuning_gravity_is_unsupported() {
    let config = SimulationConfig::new(ForceConfig::Gravity(GravityConstants::default()))
        .with_planet(Planet::new(0.0, 0.0));
    let shared = SharedSimulator::from_config(config).unwrap();

    assert!(matches!(
        shared.set_friction(1.0),
        Err(SimulationError::Unsupported { .. })
    ));
}

#[test]
fn test_drag_locks_and_releases() {
    let shared = mesh();
    let drag = shared.begin_drag(1).unwrap();

    assert_eq!(drag.index(), 1);
    assert!(shared.with_simulator(|simulator| simulator.is_locked(1)).unwrap());

    drag.move_to(Point2::new(2.0, 2.0), Duration::from_secs(1)).unwrap();
    shared.step().unwrap();
    assert_eq!(shared.latest().states[1].position, Point2::new(2.0, 2.0));

    drag.release().unwrap();
    assert!(!shared.with_simulator(|simulator| simulator.is_locked(1)).unwrap());
}

#[test]
fn test_drag_of_locked_planet_keeps_lock() {
    let shared = mesh();
    shared.add_locked_planet(0).unwrap();

    shared.begin_drag(0).unwrap().release().unwrap();

    assert!(shared.with_simulator(|simulator| simulator.is_locked(0)).unwrap());
}

#[test]
fn test_dropping_drag_releases() {
    let shared = mesh();
    {
        let _drag = shared.begin_drag(2).unwrap();
    }

    assert!(!shared.with_simulator(|simulator| simulator.is_locked(2)).unwrap());
}

#[test]
fn test_drag_waits_for_busy_simulator() {
    let shared = mesh();
    let drag = shared.begin_drag(0).unwrap();
    let holder = hold_lock(&shared, Duration::from_millis(50));

    drag.move_to(Point2::new(-1.0, 0.0), Duration::from_secs(5)).unwrap();

    holder.join().unwrap();
    assert_eq!(shared.latest().states[0].position, Point2::new(-1.0, 0.0));
}

#[test]
fn test_drag_times_out_on_busy_simulator() {
    let shared = mesh();
    let drag = shared.begin_drag(0).unwrap();
    let holder = hold_lock(&shared, Duration::from_millis(300));

    assert_eq!(
        drag.move_to(Point2::new(-1.0, 0.0), Duration::from_millis(20)),
        Err(SimulationError::Timeout)
    );

    holder.join().unwrap();
    assert_eq!(shared.latest().states[0].position, Point2::new(0.0, 0.0));
}
