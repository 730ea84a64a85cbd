//! Energy and momentum bookkeeping

use std::collections::VecDeque;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::planet::{Planet, PlanetState};

/// `Σ ½·m·|v|²`
pub fn kinetic_energy(planets: &[Planet], states: &[PlanetState]) -> f64 {
    planets
        .iter()
        .zip(states)
        .map(|(planet, state)| state.kinetic_energy(planet.mass))
        .sum()
}

/// `Σ m·v`
pub fn total_momentum(planets: &[Planet], states: &[PlanetState]) -> Vector2<f64> {
    planets
        .iter()
        .zip(states)
        .map(|(planet, state)| state.momentum(planet.mass))
        .sum()
}

/// Energy of the system at one committed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    pub step: u64,
    pub time: f64,
    pub kinetic: f64,
    pub potential: f64,
}

impl EnergySample {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// The most recent energy samples, oldest first, up to a fixed capacity.
///
/// # Examples
///
/// ```
/// use planet_sim::diagnostics::{EnergyHistory, EnergySample};
///
/// let mut history = EnergyHistory::with_capacity(2);
/// for step in 0..3 {
///     history.push(EnergySample { step, time: step as f64, kinetic: 1.0, potential: step as f64 });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.iter().next().map(|s| s.step), Some(1));
/// assert_eq!(history.max_deviation(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyHistory {
    samples: VecDeque<EnergySample>,
    capacity: usize,
}

impl EnergyHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Appends a sample, dropping the oldest once full.
    pub fn push(&mut self, sample: EnergySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&EnergySample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnergySample> + '_ {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Largest distance of any total energy from the oldest retained total.
    pub fn max_deviation(&self) -> f64 {
        let Some(first) = self.samples.front() else {
            return 0.0;
        };
        let reference = first.total();
        self.samples
            .iter()
            .map(|sample| (sample.total() - reference).abs())
            .fold(0.0, f64::max)
    }
}
