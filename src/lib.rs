#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Quadratic-map strange attractor renderer
//!
//! A quadratic-map attractor is produced by iterating a pair of
//! bivariate quadratics with twelve real coefficients:
//!
//! ```text
//! x' = a0 + a1*x + a2*x^2 + a3*y + a4*y^2 + a5*x*y
//! y' = a6 + a7*x + a8*x^2 + a9*y + a10*y^2 + a11*x*y
//! ```
//!
//! For many coefficient sets the orbit either flies off to infinity or
//! collapses onto a fixed point, but for some it settles onto a strange
//! attractor: a bounded, fractal set that the trajectory visits forever
//! without repeating.  Plotting millions of trajectory points with
//! semi-transparent compositing turns visit density into brightness and
//! makes the attractor's structure visible.
//!
//! The renderer works in two passes.  A short warm-up trajectory
//! discovers a stable bounding box for the orbit, which fixes the
//! real-plane-to-pixel mapping.  The main pass then iterates the map
//! for the requested number of steps, accumulating points in bounded
//! batches so that progress can be reported and control returned to the
//! caller between batches.

#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rand;

pub mod bounds;
pub mod error;
pub mod map;
pub mod params;
pub mod planes;
pub mod render;
pub mod surface;

pub use error::RenderError;
pub use params::{AttractorParams, ParameterSet};
pub use render::{Orchestrator, Phase, ProgressSink};
pub use surface::{CanvasSurface, Surface};
