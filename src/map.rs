// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The quadratic map kernel: one application of the recurrence, and the
//! escape predicate both phases of the renderer share.

/// A point on the real plane, threaded through the iteration as the
/// cursor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

/// The twelve coefficients `a0..a11` that define the two bivariate
/// quadratics.  Immutable once loaded.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coefficients(pub [f64; 12]);

/// Any coordinate whose magnitude passes this value is treated as
/// escaped.  Warm-up and the main phase must agree on the threshold or
/// the estimated bounds stop meaning anything.
pub const ESCAPE_THRESHOLD: f64 = 1_000_000.0;

impl Point {
    /// Constructor.
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// A point is plottable only when both coordinates are finite and
    /// within the escape threshold.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.x.abs() <= ESCAPE_THRESHOLD
            && self.y.abs() <= ESCAPE_THRESHOLD
    }
}

/// One application of the recurrence.  Pure: no side effects, no hidden
/// state, and no opinion about validity.  Overflow is returned as-is
/// (infinities and NaNs included) for the caller to judge with
/// [`Point::is_valid`].
pub fn step(p: Point, coefficients: &Coefficients) -> Point {
    let a = coefficients.0;
    let (x, y) = (p.x, p.y);
    Point {
        x: a[0] + a[1] * x + a[2] * x * x + a[3] * y + a[4] * y * y + a[5] * x * y,
        y: a[6] + a[7] * x + a[8] * x * x + a[9] * y + a[10] * y * y + a[11] * x * y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Henon in quadratic form: x' = 1 - 1.4x^2 + y, y' = 0.3x
    fn henon() -> Coefficients {
        Coefficients([
            1.0, 0.0, -1.4, 1.0, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.0,
        ])
    }

    #[test]
    fn step_evaluates_the_polynomials() {
        let a = henon();
        let p = step(Point::new(0.0, 0.0), &a);
        assert_eq!(p, Point::new(1.0, 0.0));
        let p = step(Point::new(1.0, 0.0), &a);
        assert_eq!(p, Point::new(1.0 - 1.4, 0.3));
    }

    #[test]
    fn step_uses_every_coefficient_slot() {
        let a = Coefficients([1.0; 12]);
        let p = step(Point::new(2.0, 3.0), &a);
        // 1 + 2 + 4 + 3 + 9 + 6 on both axes
        assert_eq!(p, Point::new(25.0, 25.0));
    }

    #[test]
    fn step_is_pure() {
        let a = henon();
        let p = Point::new(0.631, -0.189);
        let one = step(p, &a);
        let two = step(p, &a);
        assert_eq!(one.x.to_bits(), two.x.to_bits());
        assert_eq!(one.y.to_bits(), two.y.to_bits());
    }

    #[test]
    fn step_reports_overflow_rather_than_judging_it() {
        let a = Coefficients([0.0, f64::MAX, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let p = step(Point::new(2.0, 0.0), &a);
        assert!(p.x.is_infinite());
        assert!(!p.is_valid());
    }

    #[test]
    fn validity_is_the_escape_predicate() {
        assert!(Point::new(0.0, 0.0).is_valid());
        assert!(Point::new(ESCAPE_THRESHOLD, -ESCAPE_THRESHOLD).is_valid());
        assert!(!Point::new(ESCAPE_THRESHOLD * 1.01, 0.0).is_valid());
        assert!(!Point::new(0.0, -ESCAPE_THRESHOLD * 1.01).is_valid());
        assert!(!Point::new(f64::NAN, 0.0).is_valid());
        assert!(!Point::new(0.0, f64::INFINITY).is_valid());
    }
}
