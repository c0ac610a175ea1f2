// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The accumulation buffer the rasterizer plots into, and the display
//! surface the buffer is composited onto.  The display is a trait seam:
//! the renderer only ever clears it, composites onto it, and lets the
//! caller read the final pixels back for export.

use planes::Pixel;

/// An opaque RGB color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8);

/// The single fixed color every point is plotted in.
pub const POINT_COLOR: Color = Color(0x00, 0xff, 0x9d);

/// The display is cleared to this before a render starts compositing.
pub const BACKGROUND: Color = Color(0, 0, 0);

/// Opacity of one plotted square.  Repeated visits to the same region
/// brighten it progressively, which is what conveys density.
pub const POINT_ALPHA: f32 = 0.3;

/// Side length, in pixels, of the square plotted for each point.
pub const POINT_SIZE: usize = 5;

/// Accumulates plotted points for one render.  The buffer starts as
/// opaque black and every plot alpha-blends the fixed point color over
/// what is already there; with a single color that whole history
/// collapses into one coverage value per pixel, updated as
/// `c' = c + alpha * (1 - c)`.
pub struct AccumBuffer {
    width: usize,
    height: usize,
    coverage: Vec<f32>,
}

impl AccumBuffer {
    /// An empty (all-background) buffer of the given dimensions.
    pub fn new(width: usize, height: usize) -> AccumBuffer {
        AccumBuffer {
            width,
            height,
            coverage: vec![0.0; width * height],
        }
    }

    /// Width of the buffer.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the buffer.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Blends one [`POINT_SIZE`]-sided square anchored at the given
    /// pixel.  Rows and columns that hang off the right or bottom edge
    /// are skipped.
    pub fn plot_square(&mut self, pixel: Pixel) {
        let Pixel(left, top) = pixel;
        for row in top..(top + POINT_SIZE).min(self.height) {
            for column in left..(left + POINT_SIZE).min(self.width) {
                let c = &mut self.coverage[row * self.width + column];
                *c += POINT_ALPHA * (1.0 - *c);
            }
        }
    }

    /// Coverage in [0, 1] at one pixel.
    pub fn coverage_at(&self, pixel: Pixel) -> f32 {
        self.coverage[pixel.1 * self.width + pixel.0]
    }
}

/// A pixel-addressable display target, injected into the orchestrator
/// rather than reached for as a global.
pub trait Surface {
    /// Width and height in pixels.
    fn dimensions(&self) -> (usize, usize);

    /// Paint every pixel with one color.
    fn clear(&mut self, color: Color);

    /// Composite an accumulation buffer at full opacity with its
    /// top-left corner at `offset`.  The buffer is opaque, so this
    /// replaces the covered region outright.
    fn composite(&mut self, buffer: &AccumBuffer, offset: (usize, usize));

    /// The surface contents as tightly packed RGBA bytes, row-major
    /// from the top-left.  This is the export read-back path.
    fn pixels(&self) -> &[u8];
}

/// An in-memory RGBA surface.  This is the plain framebuffer the CLI
/// renders into and then encodes to a file.
pub struct CanvasSurface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl CanvasSurface {
    /// A surface of the given dimensions, initially all background.
    pub fn new(width: usize, height: usize) -> CanvasSurface {
        let mut surface = CanvasSurface {
            width,
            height,
            data: vec![0; width * height * 4],
        };
        surface.clear(BACKGROUND);
        surface
    }
}

impl Surface for CanvasSurface {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        for pixel in self.data.chunks_mut(4) {
            pixel[0] = color.0;
            pixel[1] = color.1;
            pixel[2] = color.2;
            pixel[3] = 0xff;
        }
    }

    fn composite(&mut self, buffer: &AccumBuffer, offset: (usize, usize)) {
        for row in 0..buffer.height().min(self.height.saturating_sub(offset.1)) {
            for column in 0..buffer.width().min(self.width.saturating_sub(offset.0)) {
                let c = buffer.coverage_at(Pixel(column, row));
                let base = ((row + offset.1) * self.width + column + offset.0) * 4;
                self.data[base] = (f32::from(POINT_COLOR.0) * c).round() as u8;
                self.data[base + 1] = (f32::from(POINT_COLOR.1) * c).round() as u8;
                self.data[base + 2] = (f32::from(POINT_COLOR.2) * c).round() as u8;
                self.data[base + 3] = 0xff;
            }
        }
    }

    fn pixels(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_buffer_has_no_coverage() {
        let buffer = AccumBuffer::new(8, 8);
        assert_eq!(buffer.coverage_at(Pixel(0, 0)), 0.0);
        assert_eq!(buffer.coverage_at(Pixel(7, 7)), 0.0);
    }

    #[test]
    fn one_plot_covers_a_square_at_point_alpha() {
        let mut buffer = AccumBuffer::new(16, 16);
        buffer.plot_square(Pixel(2, 3));
        assert!((buffer.coverage_at(Pixel(2, 3)) - POINT_ALPHA).abs() < 1e-6);
        assert!((buffer.coverage_at(Pixel(6, 7)) - POINT_ALPHA).abs() < 1e-6);
        assert_eq!(buffer.coverage_at(Pixel(1, 3)), 0.0);
        assert_eq!(buffer.coverage_at(Pixel(7, 3)), 0.0);
    }

    #[test]
    fn repeated_plots_converge_toward_full_coverage() {
        let mut buffer = AccumBuffer::new(8, 8);
        buffer.plot_square(Pixel(0, 0));
        buffer.plot_square(Pixel(0, 0));
        // 0.3 + 0.3 * 0.7
        assert!((buffer.coverage_at(Pixel(0, 0)) - 0.51).abs() < 1e-6);
        for _ in 0..100 {
            buffer.plot_square(Pixel(0, 0));
        }
        let c = buffer.coverage_at(Pixel(0, 0));
        assert!(c > 0.999 && c <= 1.0);
    }

    #[test]
    fn plots_at_the_edge_are_clipped_not_panicked() {
        let mut buffer = AccumBuffer::new(8, 8);
        buffer.plot_square(Pixel(7, 7));
        assert!(buffer.coverage_at(Pixel(7, 7)) > 0.0);
        assert_eq!(buffer.coverage_at(Pixel(6, 7)), 0.0);
    }

    #[test]
    fn clear_paints_every_pixel_opaque() {
        let mut surface = CanvasSurface::new(4, 4);
        surface.clear(Color(9, 8, 7));
        for pixel in surface.pixels().chunks(4) {
            assert_eq!(pixel, &[9, 8, 7, 0xff]);
        }
    }

    #[test]
    fn composite_writes_the_buffer_at_the_offset() {
        let mut surface = CanvasSurface::new(8, 8);
        let mut buffer = AccumBuffer::new(4, 4);
        for _ in 0..64 {
            buffer.plot_square(Pixel(0, 0));
        }
        surface.composite(&buffer, (2, 2));
        let pixels = surface.pixels();
        // Inside the composited region, fully covered: the point color.
        let base = (2 * 8 + 2) * 4;
        assert_eq!(&pixels[base..base + 4], &[0x00, 0xff, 0x9d, 0xff]);
        // Outside it, still the background.
        assert_eq!(&pixels[0..4], &[0, 0, 0, 0xff]);
    }
}
