//! The failures a render can surface.  Transient divergence during the
//! main phase is recovered internally and never appears here; every
//! other problem aborts the requested render at a phase boundary and
//! leaves previously displayed pixels untouched.

/// Everything that can go wrong between a render request and a
/// completed image.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The warm-up trajectory never produced a single valid point, so
    /// the bounding box is stuck at its sentinel extremes and no
    /// coordinate mapping can be derived.
    #[fail(display = "warm-up trajectory diverged; no valid point was ever produced")]
    DivergentWarmup,

    /// The padded bounding box has zero width or height, usually
    /// because the warm-up orbit collapsed onto a single point or a
    /// horizontal/vertical line.
    #[fail(display = "estimated bounds are degenerate; the orbit has no area to plot")]
    DegenerateBounds,

    /// The caller asked for an attractor index outside the loaded
    /// parameter set.
    #[fail(display = "attractor index {} is out of range; only {} are loaded", index, len)]
    InvalidSelection {
        /// The requested index.
        index: usize,
        /// The number of parameter sets actually loaded.
        len: usize,
    },

    /// A render was requested while another one was still estimating or
    /// rendering.  Requests are rejected, never queued.
    #[fail(display = "a render is already in progress")]
    RenderBusy,

    /// A line in a parameter file could not be parsed as fourteen real
    /// numbers (start point plus twelve coefficients).
    #[fail(display = "could not parse parameter line {}", line)]
    ParameterParse {
        /// One-based line number of the offending line.
        line: usize,
    },
}
