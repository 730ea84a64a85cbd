//! Two-dimensional N-body simulation of planets.
//!
//! A [`Simulator`] advances a fixed set of bodies under one of four force
//! models: gravity with electromagnetic coupling, an all-pairs elastic mesh,
//! an adjacent-pairs elastic chain, or a Verlet-integrated elastic field.
//! The gravity model can run a continuous collision engine that finds exact
//! contact times with [`polyroots`] and resolves them as elastic collisions.
//!
//! [`SharedSimulator`] and [`SteppingLoop`] run a simulator on a background
//! thread while other threads read published frames, lock planets and drag
//! them around.

pub mod collisions;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod locked;
pub mod planet;
pub mod recorder;
pub mod runner;
pub mod scenarios;
pub mod shared;
pub mod simulator;

#[cfg(test)]
mod diagnostics_test;
#[cfg(test)]
mod planet_test;
#[cfg(test)]
mod scenarios_test;
#[cfg(test)]
mod shared_test;

pub use config::{ForceConfig, SimulationConfig};
pub use error::SimulationError;
pub use planet::{Planet, PlanetState};
pub use runner::{Pacing, SteppingLoop};
pub use shared::{DragSession, Frame, SharedSimulator};
pub use simulator::Simulator;
