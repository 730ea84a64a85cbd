use approx::assert_abs_diff_eq;

use crate::roots::Roots;
use crate::solve::{cubic, linear, quadratic, quartic};

fn sorted(roots: &Roots) -> Vec<f64> {
    let mut values: Vec<f64> = roots.iter().collect();
    values.sort_by(f64::total_cmp);
    values
}

fn assert_roots(roots: &Roots, expected: &[f64]) {
    let found = sorted(roots);
    assert_eq!(found.len(), expected.len(), "found {found:?}");
    for (a, b) in found.iter().zip(expected) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-7);
    }
}

#[test]
fn test_linear_without_slope_has_no_root() {
    let mut roots = Roots::new();

    assert_eq!(linear(0.0, 3.0, &mut roots), 0);
    assert_eq!(linear(0.0, 0.0, &mut roots), 0);
    assert_eq!(linear(2.0, -3.0, &mut roots), 1);
    assert_eq!(roots.as_slice(), &[1.5]);
}

#[test]
fn test_quadratic_cases() {
    let mut roots = Roots::new();

    assert_eq!(quadratic(1.0, -3.0, 2.0, &mut roots), 2);
    assert_roots(&roots, &[1.0, 2.0]);

    assert_eq!(quadratic(1.0, -4.0, 4.0, &mut roots), 1);
    assert_eq!(roots.as_slice(), &[2.0]);

    assert_eq!(quadratic(1.0, 0.0, 4.0, &mut roots), 0);
    assert_eq!(quadratic(0.0, 0.0, 4.0, &mut roots), 0);
}

#[test]
fn test_quadratic_small_root_keeps_precision() {
    let mut roots = Roots::new();
    quadratic(1.0, -1e8, 1.0, &mut roots);
    let found = sorted(&roots);

    assert_abs_diff_eq!(found[0], 1e-8, epsilon = 1e-20);
}

#[test]
fn test_cubic_three_roots() {
    let mut roots = Roots::new();

    assert_eq!(cubic(1.0, -6.0, 11.0, -6.0, &mut roots), 3);
    assert_roots(&roots, &[1.0, 2.0, 3.0]);
}

#[test]
fn test_cubic_single_real_root() {
    let mut roots = Roots::new();

    assert_eq!(cubic(1.0, 0.0, 1.0, 1.0, &mut roots), 1);
    assert_abs_diff_eq!(roots.as_slice()[0], -0.6823278038280193, epsilon = 1e-8);
}

#[test]
fn test_cubic_zero_constant_factors_out_zero() {
    let mut roots = Roots::new();

    assert_eq!(cubic(1.0, 0.0, -1.0, 0.0, &mut roots), 3);
    assert_roots(&roots, &[-1.0, 0.0, 1.0]);
}

#[test]
fn test_cubic_flat_seed_is_retried() {
    let mut roots = Roots::new();

    assert_eq!(cubic(1.0, -3.0, 3.0, -2.0, &mut roots), 1);
    assert_eq!(roots.as_slice(), &[2.0]);
}

#[test]
fn test_cubic_degenerate_falls_through() {
    let mut roots = Roots::new();

    assert_eq!(cubic(0.0, 1.0, -3.0, 2.0, &mut roots), 2);
    assert_roots(&roots, &[1.0, 2.0]);
}

#[test]
fn test_quartic_four_symmetric_roots() {
    let mut roots = Roots::new();

    assert_eq!(quartic(1.0, 0.0, -20.0, 0.0, 99.0, &mut roots), 4);
    let r11 = 11f64.sqrt();
    assert_roots(&roots, &[-r11, -3.0, 3.0, r11]);
}

#[test]
fn test_quartic_four_distinct_roots() {
    let mut roots = Roots::new();

    assert_eq!(quartic(1.0, -10.0, 35.0, -50.0, 24.0, &mut roots), 4);
    assert_roots(&roots, &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_quartic_two_real_roots() {
    // (x² - 4)(x² + 1)
    let mut roots = Roots::new();

    assert_eq!(quartic(1.0, 0.0, -3.0, 0.0, -4.0, &mut roots), 2);
    assert_roots(&roots, &[-2.0, 2.0]);
}

#[test]
fn test_quartic_without_real_roots() {
    let mut roots = Roots::new();

    assert_eq!(quartic(1.0, 0.0, 2.0, 0.0, 1.0, &mut roots), 0);
    assert_eq!(quartic(-1.0, 0.0, 0.0, 0.0, -1.0, &mut roots), 0);
}

#[test]
fn test_quartic_zero_constant_adds_zero_root() {
    let mut roots = Roots::new();

    assert_eq!(quartic(1.0, 0.0, -1.0, 0.0, 0.0, &mut roots), 4);
    assert_roots(&roots, &[-1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_quartic_degenerate_falls_through() {
    let mut roots = Roots::new();

    assert_eq!(quartic(0.0, 1.0, -6.0, 11.0, -6.0, &mut roots), 3);
    assert_roots(&roots, &[1.0, 2.0, 3.0]);
}

#[test]
fn test_solver_clears_previous_roots() {
    let mut roots = Roots::new();
    quadratic(1.0, -3.0, 2.0, &mut roots);

    assert_eq!(quartic(1.0, 0.0, 0.0, 0.0, 1.0, &mut roots), 0);
    assert!(roots.is_empty());
}
