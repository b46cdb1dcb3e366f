//! Point-wise level combinators: volume, ceilings, envelopes, clamping and
//! integer-domain normalization.

use crate::signals::shortest;
use crate::{Param, Signal};

/// Width of the integer domain assumed by [`normalize`]: unsigned bytes.
pub const BYTE_WIDTH: f64 = 256.0;

/// Scales a signal by a gain expressed in decibels.
///
/// Each sample is multiplied by `10^(db / 20)`. A modulated `db` is read one
/// value per sample and the output ends with whichever operand ends first.
///
/// # Examples
///
/// ```
/// use lazytone::combinators::Volume;
///
/// let mut louder = Volume { source: vec![1.0].into_iter(), db: 20.0.into() };
/// assert!((louder.next().unwrap() - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Volume<S: Signal> {
    /// Signal being scaled.
    pub source: S,
    /// Gain in decibels.
    pub db: Param,
}

impl<S: Signal> Iterator for Volume<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let sample = self.source.next()?;
        let db = self.db.value()?;
        Some(sample * 10f64.powf(db / 20.0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        shortest(self.source.size_hint(), self.db.size_hint())
    }
}

/// Limits a signal to a (possibly time-varying) ceiling.
///
/// Only the upper side is limited; use [`HardClip`] for a two-sided clamp.
#[derive(Debug)]
pub struct Clip<S: Signal> {
    /// Signal being clipped.
    pub source: S,
    /// Upper limit for each sample.
    pub ceiling: Param,
}

impl<S: Signal> Iterator for Clip<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let sample = self.source.next()?;
        let ceiling = self.ceiling.value()?;
        Some(sample.min(ceiling))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        shortest(self.source.size_hint(), self.ceiling.size_hint())
    }
}

/// Multiplies a signal by a constant or time-varying factor.
#[derive(Debug)]
pub struct Envelope<S: Signal> {
    /// Signal being shaped.
    pub source: S,
    /// Per-sample multiplier.
    pub factor: Param,
}

impl<S: Signal> Iterator for Envelope<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let sample = self.source.next()?;
        let factor = self.factor.value()?;
        Some(sample * factor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        shortest(self.source.size_hint(), self.factor.size_hint())
    }
}

/// Clamps a signal to a fixed range (hard clipping).
///
/// # Examples
///
/// ```
/// use lazytone::combinators::HardClip;
///
/// let clipped: Vec<f64> = HardClip { source: vec![-2.0, 0.5, 2.0].into_iter(), min: -1.0, max: 1.0 }
///     .collect();
/// assert_eq!(clipped, vec![-1.0, 0.5, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct HardClip<S: Signal> {
    /// Signal being clamped.
    pub source: S,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl<S: Signal> Iterator for HardClip<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.source.next().map(|x| x.clamp(self.min, self.max))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Maps integer-domain samples in `[0, width)` onto `[-1, 1)`.
///
/// Computes `(x / width) * 2 - 1`; the default width is 256 (unsigned bytes).
#[derive(Debug, Clone)]
pub struct Normalize<S: Signal> {
    /// Integer-domain samples.
    pub source: S,
    /// Size of the input range.
    pub width: f64,
}

impl<S: Signal> Iterator for Normalize<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.source.next().map(|x| (x / self.width) * 2.0 - 1.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Applies a gain in decibels; see [`Volume`].
pub fn volume<S: Signal>(source: S, db: impl Into<Param>) -> Volume<S> {
    Volume {
        source,
        db: db.into(),
    }
}

/// Limits samples to at most `ceiling`; see [`Clip`].
pub fn clip<S: Signal>(source: S, ceiling: impl Into<Param>) -> Clip<S> {
    Clip {
        source,
        ceiling: ceiling.into(),
    }
}

/// Multiplies samples by `factor`; see [`Envelope`].
pub fn envelope<S: Signal>(source: S, factor: impl Into<Param>) -> Envelope<S> {
    Envelope {
        source,
        factor: factor.into(),
    }
}

/// Clamps samples into `[min, max]`.
pub fn hard_clip<S: Signal>(source: S, min: f64, max: f64) -> HardClip<S> {
    HardClip { source, min, max }
}

/// Normalizes unsigned byte samples onto `[-1, 1)`.
pub fn normalize<S: Signal>(source: S) -> Normalize<S> {
    normalize_width(source, BYTE_WIDTH)
}

/// Normalizes samples from `[0, width)` onto `[-1, 1)`.
pub fn normalize_width<S: Signal>(source: S, width: f64) -> Normalize<S> {
    Normalize { source, width }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: u32) -> impl Signal + Send + 'static {
        (0..n).map(f64::from)
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{a} != {e}");
        }
    }

    #[test]
    fn test_volume_default_is_unity() {
        let out: Vec<f64> = volume(numbers(10), 0.0).collect();
        let expected: Vec<f64> = (0..10).map(f64::from).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_volume_constant() {
        let out: Vec<f64> = volume(numbers(10), 5.0).collect();
        assert_close(
            &out,
            &[
                0.0,
                1.7782794100389228,
                3.5565588200778455,
                5.334838230116768,
                7.113117640155691,
                8.891397050194614,
                10.669676460233536,
                12.447955870272459,
                14.226235280311382,
                16.004514690350305,
            ],
        );
    }

    #[test]
    fn test_volume_variable() {
        let out: Vec<f64> = volume(numbers(10), Param::modulated(numbers(10))).collect();
        assert_close(
            &out,
            &[
                0.0,
                1.1220184543019633,
                2.5178508235883346,
                4.237612633868263,
                6.339572769844454,
                8.891397050194614,
                11.971573889813277,
                15.671047969978376,
                20.09509145207664,
                25.36544638138008,
            ],
        );
    }

    #[test]
    fn test_volume_incongruent() {
        let mut out = volume(numbers(10), Param::modulated(numbers(5)));
        assert_eq!(out.size_hint(), (5, Some(5)));
        let out: Vec<f64> = out.by_ref().collect();
        assert_close(
            &out,
            &[
                0.0,
                1.1220184543019633,
                2.5178508235883346,
                4.237612633868263,
                6.339572769844454,
            ],
        );
    }

    #[test]
    fn test_clip_constant() {
        let out: Vec<f64> = clip(numbers(10), 5.0).collect();
        assert_eq!(out, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_clip_variable() {
        let ceiling = Param::modulated(numbers(10).map(|x| x / 2.0));
        let out: Vec<f64> = clip(numbers(10), ceiling).collect();
        assert_eq!(out, vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5]);
    }

    #[test]
    fn test_clip_incongruent() {
        let ceiling = Param::modulated(numbers(5).map(|x| x / 2.0));
        let out: Vec<f64> = clip(numbers(10), ceiling).collect();
        assert_eq!(out, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_envelope_constant() {
        let out: Vec<f64> = envelope(numbers(10), 2.0).collect();
        let expected: Vec<f64> = (0..10).map(|x| f64::from(x) * 2.0).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_envelope_squares() {
        let out: Vec<f64> = envelope(numbers(10), Param::modulated(numbers(10))).collect();
        let expected: Vec<f64> = (0..10).map(|x| f64::from(x * x)).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_envelope_incongruent() {
        let out: Vec<f64> = envelope(numbers(10), Param::modulated(numbers(5))).collect();
        assert_eq!(out, vec![0.0, 1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn test_scalar_matches_constant_sequence() {
        let constant = || Param::modulated(std::iter::repeat(3.0));
        let a: Vec<f64> = volume(numbers(8), 3.0).collect();
        let b: Vec<f64> = volume(numbers(8), constant()).collect();
        assert_eq!(a, b);

        let a: Vec<f64> = clip(numbers(8), 3.0).collect();
        let b: Vec<f64> = clip(numbers(8), constant()).collect();
        assert_eq!(a, b);

        let a: Vec<f64> = envelope(numbers(8), 3.0).collect();
        let b: Vec<f64> = envelope(numbers(8), constant()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hard_clip() {
        let out: Vec<f64> = hard_clip(numbers(10), 2.0, 8.0).collect();
        assert_eq!(out, vec![2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 8.0]);
    }

    #[test]
    fn test_normalize() {
        let out: Vec<f64> = normalize(numbers(10)).collect();
        assert_eq!(
            out,
            vec![
                -1.0, -0.9921875, -0.984375, -0.9765625, -0.96875, -0.9609375, -0.953125,
                -0.9453125, -0.9375, -0.9296875,
            ]
        );
    }

    #[test]
    fn test_normalize_width() {
        let out: Vec<f64> = normalize_width(vec![0.0, 2.0, 4.0].into_iter(), 4.0).collect();
        assert_eq!(out, vec![-1.0, 0.0, 1.0]);
    }
}
