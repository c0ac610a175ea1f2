// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Warm-up bounds estimation.  A short trajectory run ahead of the main
//! render discovers where the orbit lives on the real plane, so that
//! the coordinate mapping can be fixed before any pixel is touched.

use itertools::Itertools;
use itertools::MinMaxResult::{MinMax, NoElements, OneElement};

use error::RenderError;
use map;
use params::AttractorParams;

/// Number of warm-up steps.  Enough for the transient to die down on
/// every attractor in the built-in set without costing visible time.
pub const WARMUP_STEPS: usize = 100;

/// Fraction of each range added to every side of the discovered box.
const PADDING: f64 = 0.1;

/// The padded real-plane rectangle a render plots into.  Computed once
/// per render and fixed thereafter.  Invariant: both ranges are
/// strictly positive; anything else is rejected as degenerate before a
/// mapper can be built from it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

impl Bounds {
    /// Width of the box.
    pub fn x_range(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the box.
    pub fn y_range(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Runs [`WARMUP_STEPS`] iterations from the attractor's starting point
/// and returns the padded bounding box of every valid point produced.
///
/// An invalid step is discarded and the cursor holds its place; unlike
/// the main phase, the warm-up never resets to the starting point.
/// Invalid points do not fold into the box.
///
/// Fails with [`RenderError::DivergentWarmup`] when no valid point was
/// ever produced, and with [`RenderError::DegenerateBounds`] when the
/// padded box has no width or no height (the orbit collapsed onto a
/// point or an axis-aligned line).
pub fn estimate(params: &AttractorParams) -> Result<Bounds, RenderError> {
    let mut cursor = params.start;
    let mut trail = Vec::with_capacity(WARMUP_STEPS);
    for _ in 0..WARMUP_STEPS {
        let next = map::step(cursor, &params.coefficients);
        if next.is_valid() {
            cursor = next;
            trail.push(next);
        }
    }

    let (x_min, x_max) = match trail.iter().map(|p| p.x).minmax() {
        MinMax(lo, hi) => (lo, hi),
        OneElement(v) => (v, v),
        NoElements => return Err(RenderError::DivergentWarmup),
    };
    let (y_min, y_max) = match trail.iter().map(|p| p.y).minmax() {
        MinMax(lo, hi) => (lo, hi),
        OneElement(v) => (v, v),
        NoElements => return Err(RenderError::DivergentWarmup),
    };

    let x_pad = (x_max - x_min) * PADDING;
    let y_pad = (y_max - y_min) * PADDING;
    let bounds = Bounds {
        x_min: x_min - x_pad,
        x_max: x_max + x_pad,
        y_min: y_min - y_pad,
        y_max: y_max + y_pad,
    };
    if bounds.x_range() <= 0.0 || bounds.y_range() <= 0.0 {
        return Err(RenderError::DegenerateBounds);
    }
    debug!(
        "warm-up bounds: x [{}, {}], y [{}, {}]",
        bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max
    );
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use map::{Coefficients, Point};
    use params::ParameterSet;

    fn params(start: Point, a: [f64; 12]) -> AttractorParams {
        AttractorParams {
            start,
            coefficients: Coefficients(a),
        }
    }

    #[test]
    fn bounded_orbits_yield_positive_ranges() {
        let set = ParameterSet::builtin();
        for index in 0..set.len() {
            let bounds = estimate(set.get(index).unwrap()).unwrap();
            assert!(bounds.x_range() > 0.0, "attractor {}", index);
            assert!(bounds.y_range() > 0.0, "attractor {}", index);
        }
    }

    #[test]
    fn the_box_is_padded_by_a_tenth_per_side() {
        // x' = -x, y' = -y: the orbit from (1, 1) flips between
        // (-1, -1) and (1, 1), so the raw box is [-1, 1] on both axes.
        let p = params(
            Point::new(1.0, 1.0),
            [0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0],
        );
        let bounds = estimate(&p).unwrap();
        assert!((bounds.x_min - -1.2).abs() < 1e-12);
        assert!((bounds.x_max - 1.2).abs() < 1e-12);
        assert!((bounds.y_min - -1.2).abs() < 1e-12);
        assert!((bounds.y_max - 1.2).abs() < 1e-12);
    }

    #[test]
    fn the_all_zero_map_is_degenerate() {
        // Every step lands on (0, 0); the box has no area.
        let p = params(Point::new(1.0, 1.0), [0.0; 12]);
        assert_eq!(estimate(&p).unwrap_err(), RenderError::DegenerateBounds);
    }

    #[test]
    fn a_line_orbit_is_degenerate_too() {
        // x' = -x with y pinned at zero: width but no height.
        let p = params(
            Point::new(1.0, 0.0),
            [0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        assert_eq!(estimate(&p).unwrap_err(), RenderError::DegenerateBounds);
    }

    #[test]
    fn a_warmup_with_no_valid_point_is_divergent() {
        // The constant term alone already puts every step past the
        // escape threshold.
        let p = params(
            Point::new(0.0, 0.0),
            [2e6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        assert_eq!(estimate(&p).unwrap_err(), RenderError::DivergentWarmup);
    }

    #[test]
    fn invalid_steps_do_not_fold_into_the_box() {
        // x doubles each step from 1.0 and escapes after twenty steps;
        // from then on the cursor holds and nothing new is folded.  The
        // box must stop at the last valid doubling, not at infinity.
        let p = params(
            Point::new(1.0, 1.0),
            [0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0],
        );
        let bounds = estimate(&p).unwrap();
        assert!(bounds.x_max.is_finite());
        assert!(bounds.x_max <= map::ESCAPE_THRESHOLD * (1.0 + 2.0 * 0.1));
    }
}
