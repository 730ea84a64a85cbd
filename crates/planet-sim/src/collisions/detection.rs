//! Earliest-contact search over all planet pairs

use polyroots::{Differentiable, Quartic, Roots};

use crate::collisions::CollisionEvent;
use crate::planet::{Planet, PlanetState};

/// Roots this far before the current instant still count as contact now.
const CONTACT_TOLERANCE: f64 = 1e-12;

/// Squared gap polynomial `|Δx + Δv·t + ½·Δa·t²|² - (r₀ + r₁)²` of a pair.
///
/// The polynomial is negative exactly while the two planets overlap.
///
/// # Examples
///
/// ```
/// use nalgebra::Vector2;
/// use planet_sim::collisions::approach_polynomial;
/// use planet_sim::planet::Planet;
///
/// let a = Planet::new(0.0, 0.0).with_radius(0.5);
/// let b = Planet::new(10.0, 0.0).with_radius(0.5);
/// let sa = a.initial_state();
/// let mut sb = b.initial_state();
/// sb.acceleration = Vector2::new(-2.0, 0.0);
///
/// // (10 - t²)² - 1 = t⁴ - 20t² + 99
/// let p = approach_polynomial(&a, &sa, &b, &sb);
/// assert_eq!((p.a, p.b, p.c, p.d, p.e), (1.0, 0.0, -20.0, 0.0, 99.0));
/// ```
pub fn approach_polynomial(
    planet_0: &Planet,
    state_0: &PlanetState,
    planet_1: &Planet,
    state_1: &PlanetState,
) -> Quartic {
    let dx = state_1.position - state_0.position;
    let dv = state_1.velocity - state_0.velocity;
    let da = state_1.acceleration - state_0.acceleration;
    let reach = planet_0.radius + planet_1.radius;

    Quartic::new(
        0.25 * da.magnitude_squared(),
        da.dot(&dv),
        da.dot(&dx) + dv.magnitude_squared(),
        2.0 * dv.dot(&dx),
        dx.magnitude_squared() - reach * reach,
    )
}

/// Earliest instant in `[0, remaining]` at which an approaching pair touches.
///
/// A root only counts while the pair is closing in (the gap polynomial is
/// decreasing), so a pair that has just bounced is not found again at its
/// contact point. Ties keep the pair found first. Pairs whose roots the
/// solver misses simply do not collide this substep.
pub fn find_earliest_collision(
    planets: &[Planet],
    states: &[PlanetState],
    remaining: f64,
) -> Option<CollisionEvent> {
    let mut roots = Roots::new();
    let mut earliest: Option<CollisionEvent> = None;

    for i in 0..states.len() {
        for j in (i + 1)..states.len() {
            let gap = approach_polynomial(&planets[i], &states[i], &planets[j], &states[j]);
            polyroots::quartic(gap.a, gap.b, gap.c, gap.d, gap.e, &mut roots);

            let limit = earliest.map_or(remaining, |event| event.time);
            let contact = roots.smallest_where(|t| {
                t >= -CONTACT_TOLERANCE && t <= limit && gap.derivative(t) < 0.0
            });

            if let Some(time) = contact {
                let time = time.max(0.0);
                if earliest.map_or(true, |event| time < event.time) {
                    earliest = Some(CollisionEvent {
                        first: i,
                        second: j,
                        time,
                    });
                }
            }
        }
    }
    earliest
}
