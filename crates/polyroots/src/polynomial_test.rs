use approx::assert_relative_eq;

use crate::newton::Differentiable;
use crate::polynomial::{Cubic, Quadratic, Quartic};

#[test]
fn test_quadratic_value_and_slope() {
    let p = Quadratic::new(2.0, -3.0, 1.0);

    assert_relative_eq!(p.value(2.0), 3.0);
    assert_relative_eq!(p.derivative(2.0), 5.0);
}

#[test]
fn test_cubic_value_and_slope() {
    let p = Cubic::new(1.0, -6.0, 11.0, -6.0);

    assert_relative_eq!(p.value(4.0), 6.0);
    assert_relative_eq!(p.derivative(4.0), 11.0);
}

#[test]
fn test_quartic_derivative_cubic() {
    let p = Quartic::new(1.0, 2.0, 3.0, 4.0, 5.0);

    assert_eq!(p.derivative_cubic(), Cubic::new(4.0, 6.0, 6.0, 4.0));
    assert_relative_eq!(p.derivative(1.0), 20.0);
    assert_relative_eq!(p.value(1.0), 15.0);
}

#[test]
fn test_quartic_deflation_by_exact_root() {
    // (x - 1)(x - 2)(x - 3)(x - 4)
    let p = Quartic::new(1.0, -10.0, 35.0, -50.0, 24.0);
    let q = p.deflate(4.0);

    assert_eq!(q, Cubic::new(1.0, -6.0, 11.0, -6.0));
}
