//! Additive synthesis from a fundamental and harmonic partials.

use super::tone::Tone;
use crate::FrameRate;

/// One overtone of a [`Synth`]: a frequency multiple of the fundamental and
/// an amplitude relative to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// Frequency as a multiple of the fundamental.
    pub multiple: f64,
    /// Amplitude relative to the fundamental.
    pub amplitude: f64,
}

impl Partial {
    /// Creates a partial at `multiple` times the fundamental.
    pub fn new(multiple: f64, amplitude: f64) -> Self {
        Self {
            multiple,
            amplitude,
        }
    }
}

/// A sum of sine tones at a fundamental plus partials.
///
/// The fundamental has amplitude 1. The mix is divided by the total absolute
/// amplitude so the output stays within `[-1, 1]`.
///
/// # Examples
///
/// ```
/// use lazytone::FrameRate;
/// use lazytone::generators::{Partial, synth};
///
/// let organ = synth(FrameRate::default(), 220.0, &[Partial::new(2.0, 0.5)], Some(0.1));
/// assert!(organ.take(4410).all(|x| (-1.0..=1.0).contains(&x)));
/// ```
#[derive(Debug)]
pub struct Synth {
    voices: Vec<(Tone, f64)>,
    gain: f64,
    remaining: Option<usize>,
}

impl Synth {
    /// Creates an endless synth voice at `frequency` Hz.
    pub fn new(rate: FrameRate, frequency: f64, partials: &[Partial]) -> Self {
        let fundamental = Partial::new(1.0, 1.0);
        let voices: Vec<(Tone, f64)> = std::iter::once(&fundamental)
            .chain(partials)
            .map(|p| (Tone::new(rate, frequency * p.multiple), p.amplitude))
            .collect();
        let total: f64 = voices.iter().map(|(_, amplitude)| amplitude.abs()).sum();

        Self {
            voices,
            gain: 1.0 / total,
            remaining: None,
        }
    }
}

impl Iterator for Synth {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match &mut self.remaining {
            Some(0) => return None,
            Some(n) => *n -= 1,
            None => {}
        }
        let mut mix = 0.0;
        for (tone, amplitude) in &mut self.voices {
            mix += tone.next()? * *amplitude;
        }
        Some(mix * self.gain)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            None => (usize::MAX, None),
            Some(n) => (n, Some(n)),
        }
    }
}

/// Additive synthesis, endless when `seconds` is `None`; see [`Synth`].
pub fn synth(rate: FrameRate, frequency: f64, partials: &[Partial], seconds: Option<f64>) -> Synth {
    let mut synth = Synth::new(rate, frequency, partials);
    synth.remaining = seconds.map(|s| rate.frames(s));
    synth
}
