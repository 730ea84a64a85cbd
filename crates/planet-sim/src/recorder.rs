//! In-memory trajectory recording

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::planet::PlanetState;
use crate::simulator::Simulator;

/// One recorded set of committed states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryFrame {
    pub step: u64,
    pub time: f64,
    pub states: Vec<PlanetState>,
}

/// A sequence of recorded frames, oldest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    /// Simulated time per substep of the run that produced the frames
    pub dt: f64,
    pub frames: Vec<TrajectoryFrame>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Positions of planet `index` across all frames.
    pub fn path_of(&self, index: usize) -> Vec<Point2<f64>> {
        self.frames
            .iter()
            .filter_map(|frame| frame.states.get(index).map(|state| state.position))
            .collect()
    }
}

impl Simulator {
    /// Steps `steps` times, keeping the current states and then every
    /// `every`-th committed state array.
    ///
    /// # Examples
    ///
    /// ```
    /// use planet_sim::config::{ElasticConstants, ForceConfig, SimulationConfig};
    /// use planet_sim::planet::Planet;
    /// use planet_sim::simulator::Simulator;
    ///
    /// let config = SimulationConfig::new(ForceConfig::ElasticMesh(ElasticConstants::default()))
    ///     .with_planet(Planet::new(0.0, 0.0))
    ///     .with_planet(Planet::new(0.5, 0.0));
    /// let mut simulator = Simulator::new(config).unwrap();
    ///
    /// let trajectory = simulator.record(10, 5);
    ///
    /// let steps: Vec<u64> = trajectory.frames.iter().map(|f| f.step).collect();
    /// assert_eq!(steps, vec![0, 5, 10]);
    /// ```
    pub fn record(&mut self, steps: usize, every: usize) -> Trajectory {
        let every = every.max(1);
        let mut trajectory = Trajectory {
            dt: self.dt(),
            frames: Vec::with_capacity(steps / every + 1),
        };
        trajectory.frames.push(self.frame());

        for done in 1..=steps {
            self.step();
            if done % every == 0 {
                trajectory.frames.push(self.frame());
            }
        }

        debug!(steps, frames = trajectory.len(), "trajectory recorded");
        trajectory
    }

    fn frame(&self) -> TrajectoryFrame {
        TrajectoryFrame {
            step: self.step_count(),
            time: self.time(),
            states: self.states().to_vec(),
        }
    }
}
