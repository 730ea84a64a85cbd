//! Closed-form and Newton-based solvers for degrees one to four.
//!
//! Every public solver clears `out`, fills it with the real roots it found
//! and returns how many that was. Repeated roots may be reported more than
//! once.

use crate::newton::{newton_with_retries, polish, Differentiable};
use crate::polynomial::{Cubic, Quartic};
use crate::roots::Roots;

/// Root of `a·x + b`. A zero slope yields no root.
pub fn linear(a: f64, b: f64, out: &mut Roots) -> usize {
    out.clear();
    push_linear(a, b, out);
    out.len()
}

/// Real roots of `a·x² + b·x + c`.
///
/// A zero leading coefficient falls through to [`linear`].
///
/// # Examples
///
/// ```
/// use polyroots::{quadratic, Roots};
///
/// let mut roots = Roots::new();
/// assert_eq!(quadratic(1.0, 2.0, 1.0, &mut roots), 1); // double root at -1
/// assert_eq!(quadratic(1.0, 0.0, 1.0, &mut roots), 0); // x² + 1
/// assert_eq!(quadratic(0.0, 2.0, -4.0, &mut roots), 1); // 2x - 4
/// assert_eq!(roots.as_slice(), &[2.0]);
/// ```
pub fn quadratic(a: f64, b: f64, c: f64, out: &mut Roots) -> usize {
    out.clear();
    push_quadratic(a, b, c, out);
    out.len()
}

/// Real roots of `a·x³ + b·x² + c·x + d`.
///
/// Returns zero roots when Newton-Raphson fails to converge.
pub fn cubic(a: f64, b: f64, c: f64, d: f64, out: &mut Roots) -> usize {
    out.clear();
    push_cubic(&Cubic::new(a, b, c, d), out);
    out.len()
}

/// Real roots of `a·x⁴ + b·x³ + c·x² + d·x + e`.
///
/// Newton-Raphson is seeded inside each sign-change bracket delimited by the
/// critical points of the quartic. The first bracket that converges gives one
/// root; the quartic is deflated by it and the cubic remainder is solved.
///
/// # Examples
///
/// ```
/// use polyroots::{quartic, Roots};
///
/// let mut roots = Roots::new();
/// // x⁴ + 1 has no real roots
/// assert_eq!(quartic(1.0, 0.0, 0.0, 0.0, 1.0, &mut roots), 0);
/// ```
pub fn quartic(a: f64, b: f64, c: f64, d: f64, e: f64, out: &mut Roots) -> usize {
    out.clear();
    push_quartic(&Quartic::new(a, b, c, d, e), out);
    out.len()
}

fn push_linear(a: f64, b: f64, out: &mut Roots) {
    if a != 0.0 {
        out.push(-b / a);
    }
}

fn push_quadratic(a: f64, b: f64, c: f64, out: &mut Roots) {
    if a == 0.0 {
        push_linear(b, c, out);
        return;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant == 0.0 {
        out.push(-b / (2.0 * a));
    } else if discriminant > 0.0 {
        // q never cancels, so both roots keep full precision
        let q = -0.5 * (b + discriminant.sqrt().copysign(b));
        out.push(q / a);
        out.push(c / q);
    }
}

fn push_cubic(cubic: &Cubic, out: &mut Roots) {
    if cubic.a == 0.0 {
        push_quadratic(cubic.b, cubic.c, cubic.d, out);
        return;
    }
    if cubic.d == 0.0 {
        push_quadratic(cubic.a, cubic.b, cubic.c, out);
        out.push(0.0);
        return;
    }

    let Some(root) = newton_with_retries(cubic, 1.0) else {
        return;
    };

    let remainder = cubic.deflate(root);
    let start = out.len();
    push_quadratic(remainder.a, remainder.b, remainder.c, out);
    polish_from(cubic, out, start);
    out.push(root);
}

fn push_quartic(quartic: &Quartic, out: &mut Roots) {
    if quartic.a == 0.0 {
        push_cubic(&Cubic::new(quartic.b, quartic.c, quartic.d, quartic.e), out);
        return;
    }
    if quartic.e == 0.0 {
        push_cubic(&Cubic::new(quartic.a, quartic.b, quartic.c, quartic.d), out);
        out.push(0.0);
        return;
    }

    let Some(root) = bracketed_root(quartic) else {
        return;
    };

    let remainder = quartic.deflate(root);
    let start = out.len();
    push_cubic(&remainder, out);
    polish_from(quartic, out, start);
    out.push(root);
}

/// First root reached by Newton from a sign-change bracket of `quartic`.
fn bracketed_root(quartic: &Quartic) -> Option<f64> {
    let mut critical = Roots::new();
    push_cubic(&quartic.derivative_cubic(), &mut critical);
    critical.sort();

    if critical.is_empty() {
        return newton_with_retries(quartic, 1.0);
    }

    // An even-degree polynomial has the sign of its leading coefficient at both ends.
    let positive_at_infinity = quartic.a > 0.0;
    let positive = |x: f64| quartic.value(x) > 0.0;

    let mut lower: Option<f64> = None;
    for upper in critical.iter().map(Some).chain(std::iter::once(None)) {
        let lower_positive = lower.map_or(positive_at_infinity, positive);
        let upper_positive = upper.map_or(positive_at_infinity, positive);

        if lower_positive != upper_positive {
            let seed = match (lower, upper) {
                (Some(lo), Some(hi)) => 0.5 * (lo + hi),
                (None, Some(hi)) => hi - 1.0,
                (Some(lo), None) => lo + 1.0,
                (None, None) => 1.0,
            };
            if let Some(root) = newton_with_retries(quartic, seed) {
                return Some(root);
            }
        }
        lower = upper;
    }
    None
}

/// Refines roots found on a deflated remainder against the undeflated polynomial.
fn polish_from<F: Differentiable>(f: &F, out: &mut Roots, start: usize) {
    out.refine_from(start, |x| polish(f, x));
}
