// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The batched accumulate/composite loop and the orchestrator that
//! drives one render from parameter selection to completed image.
//!
//! Iteration counts can reach 10^9 and beyond; one unbroken pass would
//! starve the caller of progress reports.  The loop therefore works in
//! fixed-size batches: accumulate, composite onto the display,
//! report the fraction done, and only then carry on.  Control returns
//! to the caller at every batch boundary and never mid-batch, which
//! bounds the latency of a cooperative yield to one batch of work.

use bounds;
use error::RenderError;
use map;
use params::AttractorParams;
use planes::{self, PlaneMapper};
use surface::{AccumBuffer, Surface, BACKGROUND};

/// Steps processed per batch.  A fixed constant trading reporting
/// granularity against compositing overhead.
pub const BATCH_SIZE: u64 = 100_000;

/// Receives a progress fraction and a status line after each batch.
/// Fire-and-forget: the renderer expects no acknowledgment.
pub trait ProgressSink {
    /// `fraction` is in [0, 1] and non-decreasing within one render.
    fn update(&mut self, fraction: f64, status: &str);
}

/// The phases a render moves through.  Only one render may be in
/// `Estimating` or `Rendering` at a time per orchestrator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Phase {
    /// No render has been requested yet.
    Idle,
    /// Running the warm-up trajectory to find bounds.
    Estimating,
    /// Accumulating and compositing batches.
    Rendering,
    /// The last render finished normally.
    Completed,
    /// The last render aborted; the display holds its previous pixels.
    Failed,
}

/// One step of the main phase.  A valid step yields the next cursor;
/// an invalid one yields `None` and the caller restarts the trajectory
/// at the attractor's starting point.  This differs deliberately from
/// the warm-up, which holds its place instead of restarting.
fn advance(cursor: map::Point, params: &AttractorParams) -> Option<map::Point> {
    let next = map::step(cursor, &params.coefficients);
    if next.is_valid() {
        Some(next)
    } else {
        None
    }
}

/// Iterates the map from the attractor's starting point for
/// `iterations` total steps, plotting valid points into a fresh
/// accumulation buffer and compositing the buffer onto the surface at
/// `offset` after every batch.  `on_batch` receives the exact fraction
/// of points processed so far; the final batch may be shorter than
/// [`BATCH_SIZE`] and always reports exactly 1.0.
pub fn run<S, F>(
    params: &AttractorParams,
    mapper: &PlaneMapper,
    iterations: u64,
    surface: &mut S,
    offset: (usize, usize),
    mut on_batch: F,
) where
    S: Surface,
    F: FnMut(f64),
{
    let mut accum = AccumBuffer::new(mapper.width, mapper.height);
    let mut cursor = params.start;
    let mut done: u64 = 0;
    while done < iterations {
        let batch = BATCH_SIZE.min(iterations - done);
        for _ in 0..batch {
            match advance(cursor, params) {
                Some(next) => {
                    // The clamped value feeds the next iteration too.
                    cursor = mapper.clamp_point(next);
                    if let Some(pixel) = mapper.point_to_pixel(&cursor) {
                        accum.plot_square(pixel);
                    }
                }
                None => {
                    // Transient divergence: restart the trajectory.
                    cursor = params.start;
                }
            }
        }
        done += batch;
        surface.composite(&accum, offset);
        on_batch((done as f64) / (iterations as f64));
    }
}

/// Owns a display surface and a progress sink and sequences bounds
/// estimation, rasterization, and status reporting into a single
/// render operation.  Both collaborators are injected; the orchestrator
/// reaches for no globals.
pub struct Orchestrator<S, P> {
    surface: S,
    sink: P,
    phase: Phase,
}

impl<S: Surface, P: ProgressSink> Orchestrator<S, P> {
    /// Constructor.
    pub fn new(surface: S, sink: P) -> Orchestrator<S, P> {
        Orchestrator {
            surface,
            sink,
            phase: Phase::Idle,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read access to the display surface, for export read-back.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consumes the orchestrator and hands the display surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// One full render.  On success the display surface holds the
    /// completed image and the reported progress ended at exactly 1.0.
    /// On failure the surface still holds whatever it showed before
    /// this call: the display is only cleared once estimation has
    /// succeeded, so no failed request ever disturbs a previous image.
    pub fn render(
        &mut self,
        params: &AttractorParams,
        iterations: u64,
    ) -> Result<(), RenderError> {
        if self.phase == Phase::Estimating || self.phase == Phase::Rendering {
            return Err(RenderError::RenderBusy);
        }

        self.phase = Phase::Estimating;
        self.sink.update(0.0, "Estimating bounds");
        let bounds = match bounds::estimate(params) {
            Ok(bounds) => bounds,
            Err(e) => return self.fail(e),
        };

        let (display_width, display_height) = self.surface.dimensions();
        let (width, height) = planes::fit_aspect(display_width, display_height);
        let mapper = match PlaneMapper::new(width, height, bounds) {
            Ok(mapper) => mapper,
            Err(e) => return self.fail(e),
        };
        let offset = planes::center_offset((display_width, display_height), (width, height));

        debug!(
            "rendering {} iterations into a {}x{} buffer at offset {:?}",
            iterations, width, height, offset
        );
        self.surface.clear(BACKGROUND);
        self.phase = Phase::Rendering;
        {
            let Orchestrator {
                ref mut surface,
                ref mut sink,
                ..
            } = *self;
            run(params, &mapper, iterations, surface, offset, |fraction| {
                let percent = (fraction * 100.0).round() as u32;
                sink.update(fraction, &format!("Calculating points: {}%", percent));
            });
        }

        self.phase = Phase::Completed;
        self.sink.update(1.0, "Rendering completed");
        Ok(())
    }

    fn fail(&mut self, error: RenderError) -> Result<(), RenderError> {
        debug!("render aborted: {}", error);
        self.phase = Phase::Failed;
        self.sink.update(0.0, "Rendering failed");
        Err(error)
    }
}
