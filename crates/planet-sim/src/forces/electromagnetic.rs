//! Gravity with electric and magnetic interaction between charged planets

use std::f64::consts::PI;

use nalgebra::Vector2;

use crate::config::GravityConstants;
use crate::forces::ForceModel;
use crate::planet::{Planet, PlanetState};

/// Newtonian gravity plus electric and velocity-dependent magnetic forces.
///
/// For each unordered pair with separation `Δ = x_j - x_i` and
/// `ir3 = |Δ|⁻³`, the force on `i` is
///
/// ```text
/// F_i = G·m_i·m_j·ir3·Δ                      gravity
///     + q_i·q_j/(4π·ε)·ir3·Δ                 electric, same sign as gravity
///     + μ/(4π)·q_i·q_j·ir3·(w × Δ)·(-w_y, w_x)   magnetic, w = v_j - v_i
/// ```
///
/// and `F_j = -F_i`, so momentum is conserved pair by pair. All three terms
/// share one `ir3`. Coincident planets make `ir3` infinite and the result NaN.
///
/// The electric term enters with the same sign as gravity, so like charges
/// attract and opposite charges push apart.
///
/// There is no well-defined potential for the velocity-dependent term, so the
/// model reports zero potential energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectroGravity {
    constants: GravityConstants,
}

impl ElectroGravity {
    pub fn new(constants: GravityConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> GravityConstants {
        self.constants
    }

    /// `1/(4π·ε)`
    pub fn electric_coupling(&self) -> f64 {
        1.0 / (4.0 * PI * self.constants.permittivity)
    }

    /// `μ/(4π)`
    pub fn magnetic_coupling(&self) -> f64 {
        self.constants.permeability / (4.0 * PI)
    }

    /// Force on planet `i` from planet `j`.
    pub fn pair_force(
        &self,
        planet_i: &Planet,
        state_i: &PlanetState,
        planet_j: &Planet,
        state_j: &PlanetState,
    ) -> Vector2<f64> {
        let delta = state_j.position - state_i.position;
        let ir3 = delta.magnitude_squared().powf(-1.5);

        let charges = planet_i.charge * planet_j.charge;
        let radial = self.constants.gravity * planet_i.mass * planet_j.mass
            + self.electric_coupling() * charges;

        let relative = state_j.velocity - state_i.velocity;
        let cross = relative.x * delta.y - delta.x * relative.y;
        let magnetic = self.magnetic_coupling() * charges * ir3 * cross;

        delta * (radial * ir3) + Vector2::new(-relative.y, relative.x) * magnetic
    }
}

impl ForceModel for ElectroGravity {
    fn name(&self) -> &'static str {
        "electro-gravity"
    }

    fn accumulate(&self, planets: &[Planet], states: &[PlanetState], out: &mut [Vector2<f64>]) {
        out.iter_mut().for_each(|slot| *slot = Vector2::zeros());

        for i in 0..states.len() {
            for j in (i + 1)..states.len() {
                let force = self.pair_force(&planets[i], &states[i], &planets[j], &states[j]);
                out[i] += force / planets[i].mass;
                out[j] -= force / planets[j].mass;
            }
        }
    }
}
