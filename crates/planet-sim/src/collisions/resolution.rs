//! Elastic bounce along the line of centers

use crate::collisions::CollisionEvent;
use crate::locked::LockedSet;
use crate::planet::{Planet, PlanetState};

/// Applies the one-dimensional elastic collision formula along the unit
/// normal between the two planets of `event`.
///
/// With normal components `u₀`, `u₁`:
///
/// ```text
/// u₀' = (2·m₁·u₁ + (m₀ - m₁)·u₀) / (m₀ + m₁)
/// u₁' = u₀ + u₀' - u₁
/// ```
///
/// Tangential components are untouched. A locked planet acts as an immovable
/// wall: the other planet's normal component is reflected. Coincident
/// centers have no normal and are left alone.
///
/// # Examples
///
/// ```
/// use planet_sim::collisions::{resolve_elastic, CollisionEvent};
/// use planet_sim::locked::LockedSet;
/// use planet_sim::planet::Planet;
///
/// let planets = [
///     Planet::new(0.0, 0.0).with_velocity(1.0, 0.5),
///     Planet::new(2.0, 0.0).with_velocity(-1.0, 0.0),
/// ];
/// let mut states: Vec<_> = planets.iter().map(Planet::initial_state).collect();
/// let event = CollisionEvent { first: 0, second: 1, time: 0.0 };
///
/// resolve_elastic(&planets, &mut states, &LockedSet::new(), &event);
///
/// assert_eq!(states[0].velocity.x, -1.0);
/// assert_eq!(states[0].velocity.y, 0.5);
/// assert_eq!(states[1].velocity.x, 1.0);
/// ```
pub fn resolve_elastic(
    planets: &[Planet],
    states: &mut [PlanetState],
    locked: &LockedSet,
    event: &CollisionEvent,
) {
    let (i, j) = (event.first, event.second);
    let delta = states[j].position - states[i].position;
    let distance = delta.magnitude();
    if distance == 0.0 {
        return;
    }
    let normal = delta / distance;

    let u0 = states[i].velocity.dot(&normal);
    let u1 = states[j].velocity.dot(&normal);

    let (u0_after, u1_after) = match (locked.contains(i), locked.contains(j)) {
        (false, false) => {
            let (m0, m1) = (planets[i].mass, planets[j].mass);
            let u0_after = (2.0 * m1 * u1 + u0 * (m0 - m1)) / (m0 + m1);
            (u0_after, u0 + u0_after - u1)
        }
        (true, false) => (u0, -u1),
        (false, true) => (-u0, u1),
        (true, true) => return,
    };

    states[i].velocity += normal * (u0_after - u0);
    states[j].velocity += normal * (u1_after - u1);
}
