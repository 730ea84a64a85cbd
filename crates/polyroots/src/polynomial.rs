//! Dense polynomials of degree two to four, evaluated with Horner's scheme.

use crate::newton::Differentiable;

/// `a·x² + b·x + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl Differentiable for Quadratic {
    fn value(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }

    fn derivative(&self, x: f64) -> f64 {
        2.0 * self.a * x + self.b
    }
}

/// `a·x³ + b·x² + c·x + d`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Divides by `(x - root)` using synthetic division, dropping the remainder.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyroots::{Cubic, Quadratic};
    ///
    /// // (x - 1)(x - 2)(x - 3)
    /// let cubic = Cubic::new(1.0, -6.0, 11.0, -6.0);
    /// assert_eq!(cubic.deflate(1.0), Quadratic::new(1.0, -5.0, 6.0));
    /// ```
    pub fn deflate(&self, root: f64) -> Quadratic {
        let b = self.b + root * self.a;
        let c = self.c + root * b;
        Quadratic::new(self.a, b, c)
    }
}

impl Differentiable for Cubic {
    fn value(&self, x: f64) -> f64 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }

    fn derivative(&self, x: f64) -> f64 {
        (3.0 * self.a * x + 2.0 * self.b) * x + self.c
    }
}

/// `a·x⁴ + b·x³ + c·x² + d·x + e`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

impl Quartic {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64) -> Self {
        Self { a, b, c, d, e }
    }

    /// The derivative as a cubic.
    pub fn derivative_cubic(&self) -> Cubic {
        Cubic::new(4.0 * self.a, 3.0 * self.b, 2.0 * self.c, self.d)
    }

    /// Divides by `(x - root)` using synthetic division, dropping the remainder.
    pub fn deflate(&self, root: f64) -> Cubic {
        let b = self.b + root * self.a;
        let c = self.c + root * b;
        let d = self.d + root * c;
        Cubic::new(self.a, b, c, d)
    }
}

impl Differentiable for Quartic {
    fn value(&self, x: f64) -> f64 {
        (((self.a * x + self.b) * x + self.c) * x + self.d) * x + self.e
    }

    fn derivative(&self, x: f64) -> f64 {
        self.derivative_cubic().value(x)
    }
}
