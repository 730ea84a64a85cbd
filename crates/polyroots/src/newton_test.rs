use approx::assert_abs_diff_eq;

use crate::newton::{newton_raphson, newton_with_retries, polish, NewtonOutcome};
use crate::polynomial::{Cubic, Quadratic};

#[test]
fn test_newton_converges_on_simple_root() {
    let f = Quadratic::new(1.0, 0.0, -2.0);
    let root = newton_raphson(&f, 1.0).root().unwrap();

    assert_abs_diff_eq!(root, 2f64.sqrt(), epsilon = 1e-8);
}

#[test]
fn test_newton_reports_zero_derivative() {
    let f = Quadratic::new(1.0, 0.0, 1.0);

    assert_eq!(newton_raphson(&f, 0.0), NewtonOutcome::ZeroDerivative(0.0));
}

#[test]
fn test_newton_without_real_root_does_not_converge() {
    let f = Quadratic::new(1.0, 0.0, 1.0);

    assert!(newton_raphson(&f, 0.5).root().is_none());
}

#[test]
fn test_retry_moves_seed_off_flat_point() {
    // (x - 1)³ - 1 is flat at x = 1 and has its root at 2
    let f = Cubic::new(1.0, -3.0, 3.0, -2.0);

    assert_eq!(newton_raphson(&f, 1.0), NewtonOutcome::ZeroDerivative(1.0));
    assert_eq!(newton_with_retries(&f, 1.0), Some(2.0));
}

#[test]
fn test_polish_keeps_value_on_failure() {
    let f = Quadratic::new(1.0, 0.0, 1.0);

    assert_eq!(polish(&f, 0.0), 0.0);
}

#[test]
fn test_polish_refines_rough_root() {
    let f = Quadratic::new(1.0, 0.0, -9.0);
    let refined = polish(&f, 3.1);

    assert_abs_diff_eq!(refined, 3.0, epsilon = 1e-9);
}
