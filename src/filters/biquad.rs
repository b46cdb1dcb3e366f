//! Second-order (biquad) filters and band-pass / band-stop design.
//!
//! The designs follow the classic two-pole recursive band filters: the pole
//! radius `R = 1 - 3·BW` sets the bandwidth and the gain term `K` normalizes
//! the response at the center frequency.

use std::f64::consts::TAU;

use super::iir::Iir;
use crate::{FrameRate, Signal};

/// Normalized biquad coefficients (`a0 = 1`).
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, filters::band_pass};
///
/// let filter = band_pass(FrameRate::default(), 1000.0, 100.0);
/// let out: Vec<f64> = filter.apply(vec![1.0, 0.0, 0.0].into_iter()).collect();
/// assert_eq!(out.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl Biquad {
    /// Creates coefficients from feedforward `b` and feedback `a`, dividing
    /// everything by `a[0]`.
    pub fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0 = a[0];
        Self {
            b0: b[0] / a0,
            b1: b[1] / a0,
            b2: b[2] / a0,
            a1: a[1] / a0,
            a2: a[2] / a0,
        }
    }

    /// Feedback coefficients `[1, a1, a2]`.
    pub fn feedback(&self) -> [f64; 3] {
        [1.0, self.a1, self.a2]
    }

    /// Feedforward coefficients `[b0, b1, b2]`.
    pub fn feedforward(&self) -> [f64; 3] {
        [self.b0, self.b1, self.b2]
    }

    /// Filters `source` with fresh, zeroed state.
    pub fn apply<S: Signal>(&self, source: S) -> BiquadFilter<S> {
        BiquadFilter {
            source,
            coefficients: *self,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }
}

impl From<Biquad> for Iir {
    fn from(biquad: Biquad) -> Self {
        Iir::new(biquad.feedback(), biquad.feedforward())
    }
}

/// A biquad running over one input sequence (Direct Form I).
#[derive(Debug, Clone)]
pub struct BiquadFilter<S> {
    source: S,
    coefficients: Biquad,

    x1: f64, // Input at t-1
    x2: f64, // Input at t-2
    y1: f64, // Output at t-1
    y2: f64, // Output at t-2
}

impl<S> BiquadFilter<S> {
    /// The normalized coefficients this filter runs with.
    pub fn coefficients(&self) -> &Biquad {
        &self.coefficients
    }
}

impl<S: Signal> Iterator for BiquadFilter<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let x0 = self.source.next()?;
        let c = &self.coefficients;

        // y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
        let y0 = c.b0 * x0 + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x0;
        self.y2 = self.y1;
        self.y1 = y0;

        Some(y0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Pole radius `R` and the terms `cos(2πf)` and `K` shared by both designs.
fn resonator(rate: FrameRate, center: f64, bandwidth: f64) -> (f64, f64, f64) {
    let f = center / rate.as_f64();
    let bw = bandwidth / rate.as_f64();
    let r = 1.0 - 3.0 * bw;
    let cos = (TAU * f).cos();
    let k = (1.0 - 2.0 * r * cos + r * r) / (2.0 - 2.0 * cos);
    (r, cos, k)
}

/// Designs a band-pass filter around `center` Hz, `bandwidth` Hz wide.
///
/// Expects `0 < center < rate / 2` and a bandwidth small enough to keep the
/// pole radius positive; outside that range the output is numerically
/// meaningless but nothing panics.
pub fn band_pass(rate: FrameRate, center: f64, bandwidth: f64) -> Biquad {
    let (r, cos, k) = resonator(rate, center, bandwidth);
    Biquad::new(
        [1.0 - k, 2.0 * (k - r) * cos, r * r - k],
        [1.0, -2.0 * r * cos, r * r],
    )
}

/// Designs a band-stop (notch) filter around `center` Hz, `bandwidth` Hz wide.
///
/// Same preconditions as [`band_pass`].
pub fn band_stop(rate: FrameRate, center: f64, bandwidth: f64) -> Biquad {
    let (r, cos, k) = resonator(rate, center, bandwidth);
    Biquad::new([k, -2.0 * k * cos, k], [1.0, -2.0 * r * cos, r * r])
}
