//! Real roots of polynomials up to degree four.
//!
//! Quadratics are solved in closed form. Cubics and quartics are solved by
//! Newton-Raphson followed by deflation: once one root is known the polynomial
//! is divided by `(x - root)` and the lower-degree remainder is solved in turn.
//! Quartics seed Newton from the brackets between the critical points of the
//! polynomial (the real roots of its derivative), which finds every real root
//! in ordinary cases but is not a complete method. A pathological quartic can
//! lose a root; callers should treat a missing root as "not found", never as
//! an error.
//!
//! # Examples
//!
//! ```
//! use polyroots::{quartic, Roots};
//!
//! // (x² - 9)(x² - 11) = x⁴ - 20x² + 99
//! let mut roots = Roots::new();
//! let count = quartic(1.0, 0.0, -20.0, 0.0, 99.0, &mut roots);
//!
//! assert_eq!(count, 4);
//! let smallest_positive = roots.smallest_in(0.0, f64::INFINITY).unwrap();
//! assert!((smallest_positive - 3.0).abs() < 1e-8);
//! ```

pub mod newton;
pub mod polynomial;
pub mod roots;
pub mod solve;

#[cfg(test)]
mod newton_test;
#[cfg(test)]
mod polynomial_test;
#[cfg(test)]
mod solve_test;

pub use newton::{newton_raphson, Differentiable, NewtonOutcome, ITERATION_LIMIT, TOLERANCE};
pub use polynomial::{Cubic, Quadratic, Quartic};
pub use roots::{Roots, MAX_ROOTS};
pub use solve::{cubic, linear, quadratic, quartic};
