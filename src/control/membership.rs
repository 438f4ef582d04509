//! Trapezoidal membership functions.
//!
//! ```text
//!  1 ┤      b ________ c
//!    │       /        \
//!    │      /          \
//!  0 ┤_____/            \_____
//!        a                d
//! ```
//!
//! A triangle is the `b == c` case; a shoulder (left or right step) is the
//! `a == b` or `c == d` case.  Zero-width ramps are treated as steps.

use crate::error::FuzzyError;

/// Four-breakpoint trapezoid, `a <= b <= c <= d`.  Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembershipFunction {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
}

impl MembershipFunction {
    /// Build a trapezoid, rejecting non-finite or unordered breakpoints.
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Result<Self, FuzzyError> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite();
        if !finite || a > b || b > c || c > d {
            return Err(FuzzyError::InvalidBreakpoints { a, b, c, d });
        }
        Ok(Self { a, b, c, d })
    }

    /// Unchecked constructor for static tables.  Table contents are covered
    /// by unit tests instead of a runtime check.
    pub const fn trapezoid(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Triangle peaking at `b`.
    pub fn triangle(a: f32, b: f32, c: f32) -> Result<Self, FuzzyError> {
        Self::new(a, b, b, c)
    }

    /// Breakpoints as `(a, b, c, d)`.
    pub fn breakpoints(&self) -> (f32, f32, f32, f32) {
        (self.a, self.b, self.c, self.d)
    }

    /// Closed interval outside of which the degree is zero.
    pub fn support(&self) -> (f32, f32) {
        (self.a, self.d)
    }

    /// Plateau on which the degree is exactly one.
    pub fn core(&self) -> (f32, f32) {
        (self.b, self.c)
    }

    /// Degree of truth of `x` in `[0, 1]`.
    pub fn degree(&self, x: f32) -> f32 {
        if !x.is_finite() {
            return 0.0;
        }
        // Plateau first so that degree(b) == degree(c) == 1 even on shoulders.
        if self.b <= x && x <= self.c {
            return 1.0;
        }
        if x <= self.a || x >= self.d {
            return 0.0;
        }
        if x < self.b {
            let width = self.b - self.a;
            if width <= 0.0 { 1.0 } else { (x - self.a) / width }
        } else {
            let width = self.d - self.c;
            if width <= 0.0 { 1.0 } else { (self.d - x) / width }
        }
    }

    /// `min(degree(x), level)`, the Mamdani implication clip.
    pub fn clipped(&self, x: f32, level: f32) -> f32 {
        self.degree(x).min(level)
    }
}
