//! Attractor parameter sets: the built-in presets, the one-line-per-
//! attractor text format, and a random search for new bounded orbits.
//!
//! A parameter line is fourteen whitespace-separated reals: the
//! starting point followed by the twelve coefficients.
//!
//! ```text
//! x0 y0 a0 a1 a2 a3 a4 a5 a6 a7 a8 a9 a10 a11
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use rand::distributions::{Distribution, Uniform};
use rand::thread_rng;
use std::io::{BufRead, BufReader, Read};

use bounds;
use error::RenderError;
use map::{self, Coefficients, Point};

/// Everything one render needs to know about an attractor: where the
/// trajectory starts and the twelve coefficients that drive it.
/// Supplied by the caller and read-only to the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AttractorParams {
    /// The initial point.  Both the warm-up and the main phase start
    /// here, and the main phase returns here after a divergent step.
    pub start: Point,
    /// The recurrence coefficients.
    pub coefficients: Coefficients,
}

/// An ordered, indexable collection of attractor parameters.
#[derive(Debug)]
pub struct ParameterSet(Vec<AttractorParams>);

/// The coefficient range Sprott used when searching the quadratic map
/// family for strange attractors.
const COEFF_RANGE: f64 = 1.2;

/// Sprott's customary starting point for the search.
const SEARCH_START: Point = Point { x: 0.05, y: 0.05 };

impl ParameterSet {
    /// A handful of known-good attractors, usable without any external
    /// parameter file.  The first two are classic maps rewritten in the
    /// twelve-coefficient quadratic form; the rest are coefficient sets
    /// from Sprott's published search codes.
    pub fn builtin() -> ParameterSet {
        ParameterSet(vec![
            // Henon: x' = 1 - 1.4x^2 + y, y' = 0.3x
            AttractorParams {
                start: Point::new(0.0, 0.0),
                coefficients: Coefficients([
                    1.0, 0.0, -1.4, 1.0, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.0,
                ]),
            },
            // Tinkerbell: x' = x^2 - y^2 + 0.9x - 0.6013y
            //             y' = 2xy + 2x + 0.5y
            AttractorParams {
                start: Point::new(-0.72, -0.64),
                coefficients: Coefficients([
                    0.0, 0.9, 1.0, -0.6013, -1.0, 0.0, 0.0, 2.0, 0.0, 0.5, 0.0, 2.0,
                ]),
            },
            // Sprott GLXOESFTTPSV
            AttractorParams {
                start: SEARCH_START,
                coefficients: Coefficients([
                    -0.6, -0.1, 1.1, 0.2, -0.8, 0.6, -0.7, 0.7, 0.7, 0.3, 0.6, 0.9,
                ]),
            },
            // Sprott ILIBVPKJWGRR
            AttractorParams {
                start: SEARCH_START,
                coefficients: Coefficients([
                    -0.4, -0.1, -0.4, -1.1, 0.9, 0.3, -0.2, -0.3, 1.0, -0.6, 0.5, 0.5,
                ]),
            },
        ])
    }

    /// Reads one attractor per line from anything readable.  This is
    /// the interchange format the parameter files use: a collection of
    /// single-line entries concatenated into one file.
    pub fn from_reader<R: Read>(source: R) -> Result<ParameterSet, RenderError> {
        let mut entries = vec![];
        for (number, line) in BufReader::new(source).lines().enumerate() {
            let line = line.map_err(|_| RenderError::ParameterParse { line: number + 1 })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            entries.push(parse_line(line, number + 1)?);
        }
        Ok(ParameterSet(entries))
    }

    /// The number of loaded parameter sets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indexed read access.  An out-of-range index is reported before
    /// any rendering state exists.
    pub fn get(&self, index: usize) -> Result<&AttractorParams, RenderError> {
        self.0.get(index).ok_or(RenderError::InvalidSelection {
            index,
            len: self.0.len(),
        })
    }
}

fn parse_line(line: &str, number: usize) -> Result<AttractorParams, RenderError> {
    let fields: Result<Vec<f64>, _> = line.split_whitespace().map(str::parse).collect();
    let fields = fields.map_err(|_| RenderError::ParameterParse { line: number })?;
    if fields.len() != 14 {
        return Err(RenderError::ParameterParse { line: number });
    }
    let mut a = [0.0; 12];
    a.copy_from_slice(&fields[2..]);
    Ok(AttractorParams {
        start: Point::new(fields[0], fields[1]),
        coefficients: Coefficients(a),
    })
}

/// Draws one coefficient set uniformly from Sprott's search range.
/// Most draws diverge or collapse; see [`find_bounded`].
pub fn random_params() -> AttractorParams {
    let between = Uniform::new_inclusive(-COEFF_RANGE, COEFF_RANGE);
    let mut rng = thread_rng();
    let mut a = [0.0; 12];
    for c in a.iter_mut() {
        *c = between.sample(&mut rng);
    }
    AttractorParams {
        start: SEARCH_START,
        coefficients: Coefficients(a),
    }
}

/// Steps the chaos probe runs before judging a candidate.
const PROBE_STEPS: usize = 1000;

/// Separation of the shadow trajectory, renormalized every step.
const PROBE_SEPARATION: f64 = 1e-6;

/// Minimum per-step average log-separation growth for a candidate to
/// count as chaotic.  Sprott's searches use the same idea: a fixed
/// point or limit cycle sits at or below zero, a strange attractor
/// comfortably above.
const LYAPUNOV_FLOOR: f64 = 0.001;

/// A crude largest-Lyapunov probe.  Tracks a shadow trajectory a tiny
/// separation away from the main one, renormalizing the separation
/// every step, and demands that the orbit stay valid for the whole
/// probe while the separation grows on average.  Escaping orbits fail
/// the validity check; converging ones fail the growth check.
fn is_chaotic(params: &AttractorParams) -> bool {
    let mut cursor = params.start;
    let mut shadow = Point::new(params.start.x + PROBE_SEPARATION, params.start.y);
    let mut log_growth = 0.0;
    for _ in 0..PROBE_STEPS {
        cursor = map::step(cursor, &params.coefficients);
        shadow = map::step(shadow, &params.coefficients);
        if !cursor.is_valid() || !shadow.is_valid() {
            return false;
        }
        let dx = shadow.x - cursor.x;
        let dy = shadow.y - cursor.y;
        let d = dx.hypot(dy);
        if d == 0.0 {
            return false;
        }
        log_growth += (d / PROBE_SEPARATION).ln();
        shadow = Point::new(
            cursor.x + dx * PROBE_SEPARATION / d,
            cursor.y + dy * PROBE_SEPARATION / d,
        );
    }
    log_growth / (PROBE_STEPS as f64) > LYAPUNOV_FLOOR
}

/// Draws random coefficient sets until one looks like a strange
/// attractor: chaotic under the Lyapunov probe and renderable under
/// bounds estimation.  Returns `None` when the attempt budget runs
/// out.  Expect on the order of a few percent of draws to qualify.
pub fn find_bounded(attempts: usize) -> Option<AttractorParams> {
    for _ in 0..attempts {
        let candidate = random_params();
        if is_chaotic(&candidate) && bounds::estimate(&candidate).is_ok() {
            return Some(candidate);
        }
    }
    None
}
