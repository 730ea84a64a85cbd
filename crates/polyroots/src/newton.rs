//! Newton-Raphson iteration on differentiable scalar functions.

use tracing::trace;

/// Convergence tolerance on `|f(x)|`.
pub const TOLERANCE: f64 = 1e-8;

/// Maximum number of Newton iterations before giving up.
pub const ITERATION_LIMIT: usize = 10_000;

/// How many times a stalled seed is moved before giving up.
const SEED_RETRIES: usize = 64;

/// A scalar function with a known first derivative.
pub trait Differentiable {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;
}

/// How a Newton-Raphson run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NewtonOutcome {
    /// `|f(x)|` fell below [`TOLERANCE`].
    Converged(f64),
    /// The derivative was exactly zero at this iterate.
    ZeroDerivative(f64),
    /// The iterate became NaN or infinite.
    Diverged,
    /// [`ITERATION_LIMIT`] iterations ran without converging.
    IterationLimit(f64),
}

impl NewtonOutcome {
    /// The root, if the run converged.
    pub fn root(self) -> Option<f64> {
        match self {
            NewtonOutcome::Converged(x) => Some(x),
            _ => None,
        }
    }
}

/// Runs Newton-Raphson on `f` starting from `seed`.
///
/// # Examples
///
/// ```
/// use polyroots::{newton_raphson, Cubic, NewtonOutcome};
///
/// // x³ - 8 has its only real root at 2
/// let f = Cubic::new(1.0, 0.0, 0.0, -8.0);
/// match newton_raphson(&f, 1.0) {
///     NewtonOutcome::Converged(x) => assert!((x - 2.0).abs() < 1e-8),
///     other => panic!("unexpected outcome {other:?}"),
/// }
/// ```
pub fn newton_raphson<F: Differentiable + ?Sized>(f: &F, seed: f64) -> NewtonOutcome {
    let mut x = seed;
    for _ in 0..ITERATION_LIMIT {
        let y = f.value(x);
        if y.abs() <= TOLERANCE {
            return NewtonOutcome::Converged(x);
        }

        let slope = f.derivative(x);
        if slope == 0.0 {
            return NewtonOutcome::ZeroDerivative(x);
        }

        x -= y / slope;
        if !x.is_finite() {
            return NewtonOutcome::Diverged;
        }
    }
    NewtonOutcome::IterationLimit(x)
}

/// Newton-Raphson that steps one unit to the right whenever the iterate lands
/// on a flat point, then tries again.
///
/// Returns `None` when no attempt converges.
pub fn newton_with_retries<F: Differentiable + ?Sized>(f: &F, seed: f64) -> Option<f64> {
    let mut seed = seed;
    for _ in 0..SEED_RETRIES {
        match newton_raphson(f, seed) {
            NewtonOutcome::Converged(x) => return Some(x),
            NewtonOutcome::ZeroDerivative(x) => seed = x + 1.0,
            outcome => {
                trace!(seed, ?outcome, "newton failed");
                return None;
            }
        }
    }
    None
}

/// Refines `x` against `f`, keeping the original when refinement fails.
pub fn polish<F: Differentiable + ?Sized>(f: &F, x: f64) -> f64 {
    newton_raphson(f, x).root().unwrap_or(x)
}
