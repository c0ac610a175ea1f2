//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral pixel plane with an origin at
//! 0,0 and the padded real-plane box discovered during warm-up, plus
//! the 4:3 buffer-sizing helpers the renderer uses to fit that pixel
//! plane inside an arbitrary display surface.

use num::clamp;

use bounds::Bounds;
use error::RenderError;
use map::Point;

/// Fixed aspect ratio of the accumulation buffer, width over height.
const ASPECT: f64 = 4.0 / 3.0;

/// The clamp window is this much wider than the plotted box, so that
/// main-phase excursions beyond the warm-up-derived bounds are pulled
/// back toward the box instead of being lost entirely.
const CLAMP_MARGIN: f64 = 1.5;

/// Describes the left and top of a point in the pixel plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps points from the bounded real plane onto a pixel plane of fixed
/// dimensions.  Larger real y maps to a smaller pixel row, so the image
/// comes out with y pointing up the way the mathematics reads.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Width of the pixel plane.
    pub width: usize,
    /// Height of the pixel plane.
    pub height: usize,
    bounds: Bounds,
    // The ratio mapping the width and height, respectively, of the two
    // different planes.
    grid_factors: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the pixel dimensions and the padded bounds.
    /// Refuses a box with no width or no height, since the mapping
    /// divides by both ranges.
    pub fn new(width: usize, height: usize, bounds: Bounds) -> Result<PlaneMapper, RenderError> {
        if bounds.x_range() <= 0.0 || bounds.y_range() <= 0.0 {
            return Err(RenderError::DegenerateBounds);
        }
        let grid_factors = (
            (width as f64) / bounds.x_range(),
            (height as f64) / bounds.y_range(),
        );
        Ok(PlaneMapper {
            width,
            height,
            bounds,
            grid_factors,
        })
    }

    /// Pulls a freshly stepped point into the tolerated window around
    /// the bounds.  The clamped value becomes the next cursor, not just
    /// the plotted position.
    pub fn clamp_point(&self, p: Point) -> Point {
        Point {
            x: clamp(
                p.x,
                self.bounds.x_min * CLAMP_MARGIN,
                self.bounds.x_max * CLAMP_MARGIN,
            ),
            y: clamp(
                p.y,
                self.bounds.y_min * CLAMP_MARGIN,
                self.bounds.y_max * CLAMP_MARGIN,
            ),
        }
    }

    /// Given a point on the real plane, map it as closely as possible
    /// to a point on the pixel plane.  Points that land outside the
    /// plane are dropped, not clamped into range.
    pub fn point_to_pixel(&self, point: &Point) -> Option<Pixel> {
        let left = (point.x - self.bounds.x_min) * self.grid_factors.0;
        let top = (self.bounds.y_max - point.y) * self.grid_factors.1;
        if left < 0.0 || left >= (self.width as f64) || top < 0.0 || top >= (self.height as f64) {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }
}

/// The largest 4:3 rectangle that fits within a display of the given
/// dimensions.  The accumulation buffer is sized with this and later
/// composited centered, so the attractor keeps its proportions on any
/// display.
pub fn fit_aspect(display_width: usize, display_height: usize) -> (usize, usize) {
    if (display_width as f64) / (display_height as f64) > ASPECT {
        // Display is wider than the target ratio.
        (
            ((display_height as f64) * ASPECT).floor() as usize,
            display_height,
        )
    } else {
        (
            display_width,
            ((display_width as f64) / ASPECT).floor() as usize,
        )
    }
}

/// Offset that centers a buffer of the given size on a display of the
/// given size.
pub fn center_offset(display: (usize, usize), buffer: (usize, usize)) -> (usize, usize) {
    ((display.0 - buffer.0) / 2, (display.1 - buffer.1) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Bounds {
        Bounds {
            x_min: -1.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
        }
    }

    #[test]
    fn planemapper_fails_on_a_flat_box() {
        let flat = Bounds {
            x_min: 0.0,
            x_max: 0.0,
            y_min: -1.0,
            y_max: 1.0,
        };
        assert!(PlaneMapper::new(4, 4, flat).is_err());
    }

    #[test]
    fn planemapper_passes_on_a_good_box() {
        assert!(PlaneMapper::new(4, 4, unit_box()).is_ok());
    }

    #[test]
    fn interior_points_map_onto_the_plane() {
        let pm = PlaneMapper::new(640, 480, unit_box()).unwrap();
        assert_eq!(pm.point_to_pixel(&Point::new(0.0, 0.0)), Some(Pixel(320, 240)));
        assert_eq!(pm.point_to_pixel(&Point::new(-1.0, 1.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Point::new(-0.5, 0.5)), Some(Pixel(160, 120)));
    }

    #[test]
    fn larger_real_y_maps_to_a_smaller_row() {
        let pm = PlaneMapper::new(100, 100, unit_box()).unwrap();
        let high = pm.point_to_pixel(&Point::new(0.0, 0.9)).unwrap();
        let low = pm.point_to_pixel(&Point::new(0.0, -0.9)).unwrap();
        assert!(high.1 < low.1);
    }

    #[test]
    fn off_plane_points_are_dropped() {
        let pm = PlaneMapper::new(100, 100, unit_box()).unwrap();
        assert_eq!(pm.point_to_pixel(&Point::new(1.5, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Point::new(0.0, -1.5)), None);
        // The far edges themselves fall just past the last pixel.
        assert_eq!(pm.point_to_pixel(&Point::new(1.0, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Point::new(0.0, -1.0)), None);
    }

    #[test]
    fn the_clamp_window_is_half_again_the_box() {
        let pm = PlaneMapper::new(100, 100, unit_box()).unwrap();
        let p = pm.clamp_point(Point::new(7.0, -7.0));
        assert_eq!(p, Point::new(1.5, -1.5));
        // Points already inside the window pass through untouched.
        let p = pm.clamp_point(Point::new(0.25, -1.25));
        assert_eq!(p, Point::new(0.25, -1.25));
    }

    #[test]
    fn fit_aspect_fills_a_matching_display() {
        assert_eq!(fit_aspect(800, 600), (800, 600));
    }

    #[test]
    fn fit_aspect_letterboxes_a_wide_display() {
        assert_eq!(fit_aspect(1000, 600), (800, 600));
    }

    #[test]
    fn fit_aspect_letterboxes_a_tall_display() {
        assert_eq!(fit_aspect(800, 700), (800, 600));
    }

    #[test]
    fn buffers_are_centered_on_the_display() {
        assert_eq!(center_offset((1000, 600), (800, 600)), (100, 0));
        assert_eq!(center_offset((800, 700), (800, 600)), (0, 50));
    }
}
