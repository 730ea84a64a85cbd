use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Static description of one simulated body.
///
/// Position and velocity are the values the body starts from. Index position
/// in the planet list is the body's identity: `planets[i]` always pairs with
/// `states[i]`.
///
/// # Examples
///
/// ```
/// use planet_sim::planet::Planet;
///
/// let planet = Planet::new(1.0, 2.0)
///     .with_velocity(0.0, -1.0)
///     .with_mass(3.0)
///     .with_charge(-1.0);
///
/// assert_eq!(planet.radius, 1.0);
/// assert_eq!(planet.kinetic_energy(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default)]
    pub charge: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_mass() -> f64 {
    1.0
}

fn default_radius() -> f64 {
    1.0
}

impl Planet {
    /// A body at rest at `(x, y)` with unit mass, unit radius and no charge.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            velocity: Vector2::zeros(),
            mass: default_mass(),
            charge: 0.0,
            radius: default_radius(),
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = Vector2::new(vx, vy);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// The dynamic state this planet starts from: its position and velocity,
    /// no acceleration.
    pub fn initial_state(&self) -> PlanetState {
        PlanetState {
            position: self.position,
            velocity: self.velocity,
            ..PlanetState::at_rest(self.position)
        }
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }
}

impl Default for Planet {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Dynamic snapshot of one body at one substep.
///
/// The `ring_angle*` fields are display-only orientation for chain models and
/// never feed back into the dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetState {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub acceleration: Vector2<f64>,
    pub ring_angle: f64,
    pub ring_angle_velocity: f64,
    pub ring_angle_acceleration: f64,
}

impl PlanetState {
    pub fn at_rest(position: Point2<f64>) -> Self {
        Self {
            position,
            velocity: Vector2::zeros(),
            acceleration: Vector2::zeros(),
            ring_angle: 0.0,
            ring_angle_velocity: 0.0,
            ring_angle_acceleration: 0.0,
        }
    }

    /// Zeroes velocity and acceleration, leaving the body where it is.
    pub fn pin(&mut self) {
        self.velocity = Vector2::zeros();
        self.acceleration = Vector2::zeros();
    }

    /// Constant-acceleration drift over `t`:
    /// `x += v·t + a·t²/2`, then `v += a·t`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::{Point2, Vector2};
    /// use planet_sim::planet::PlanetState;
    ///
    /// let mut state = PlanetState::at_rest(Point2::origin());
    /// state.velocity = Vector2::new(1.0, 0.0);
    /// state.acceleration = Vector2::new(0.0, 2.0);
    /// state.advance(1.0);
    ///
    /// assert_eq!(state.position, Point2::new(1.0, 1.0));
    /// assert_eq!(state.velocity, Vector2::new(1.0, 2.0));
    /// ```
    pub fn advance(&mut self, t: f64) {
        self.position += self.velocity * t + self.acceleration * (0.5 * t * t);
        self.velocity += self.acceleration * t;
    }

    pub fn momentum(&self, mass: f64) -> Vector2<f64> {
        self.velocity * mass
    }

    pub fn kinetic_energy(&self, mass: f64) -> f64 {
        0.5 * mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &PlanetState) -> f64 {
        (other.position - self.position).magnitude()
    }
}
