//! Streaming IIR filters.
//!
//! A filter description ([`Iir`] or [`Biquad`]) holds only coefficients.
//! Applying it to a signal creates a filter iterator owning the history for
//! that one traversal, so descriptions can be shared and re-applied freely.

mod biquad;
mod iir;

pub use biquad::{Biquad, BiquadFilter, band_pass, band_stop};
pub use iir::{Iir, IirFilter};

use crate::{FrameRate, Signal};

/// Extension trait providing filter methods on any Signal.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, filters::FilterExt, noise::white_noise};
///
/// let rate = FrameRate::default();
/// let hiss: Vec<f64> = white_noise().band_pass(rate, 2000.0, 100.0).take(64).collect();
/// assert_eq!(hiss.len(), 64);
/// ```
pub trait FilterExt: Signal + Sized {
    /// Applies a generic IIR filter.
    fn iir(self, filter: &Iir) -> IirFilter<Self> {
        filter.apply(self)
    }

    /// Applies biquad coefficients.
    fn biquad(self, filter: &Biquad) -> BiquadFilter<Self> {
        filter.apply(self)
    }

    /// Keeps the band around `center` Hz; see [`band_pass`].
    fn band_pass(self, rate: FrameRate, center: f64, bandwidth: f64) -> BiquadFilter<Self> {
        band_pass(rate, center, bandwidth).apply(self)
    }

    /// Removes the band around `center` Hz; see [`band_stop`].
    fn band_stop(self, rate: FrameRate, center: f64, bandwidth: f64) -> BiquadFilter<Self> {
        band_stop(rate, center, bandwidth).apply(self)
    }
}

impl<T: Signal> FilterExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_chain() {
        let rate = FrameRate::new(8000);
        let input = || (0..128).map(|n| f64::from(n % 5));
        let chained: Vec<f64> = input()
            .band_pass(rate, 1000.0, 100.0)
            .band_stop(rate, 1000.0, 100.0)
            .collect();

        let pass = band_pass(rate, 1000.0, 100.0);
        let stop = band_stop(rate, 1000.0, 100.0);
        let manual: Vec<f64> = stop.apply(pass.apply(input())).collect();
        assert_eq!(chained, manual);
    }

    #[test]
    fn test_iir_method() {
        let moving_sum = Iir::new(vec![1.0], vec![1.0, 1.0]);
        let out: Vec<f64> = vec![1.0, 1.0, 1.0].into_iter().iir(&moving_sum).collect();
        assert_eq!(out, vec![1.0, 2.0, 2.0]);
    }
}
