//! Sine tone generators.

use std::f64::consts::TAU;

use crate::combinators::CropWithFades;
use crate::{FrameRate, Param};

/// Frequency used by [`beep`] when none is given, in Hz.
pub const DEFAULT_FREQUENCY: f64 = 440.0;

/// Length of a default [`beep`], in seconds.
pub const BEEP_SECONDS: f64 = 0.25;

/// Fade-in and fade-out length of a [`beep`], in seconds.
pub const BEEP_FADE_SECONDS: f64 = 0.01;

/// A sine tone with a fixed or time-varying frequency.
///
/// The phase is kept in cycles. Each sample is `sin(2π·phase)` and the phase
/// then advances by `f[n] / rate`, so a sweeping frequency stays continuous.
/// A modulated frequency ends the tone when it runs out.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, generators::Tone};
///
/// let mut tone = Tone::new(FrameRate::new(4), 1.0);
/// assert_eq!(tone.next(), Some(0.0));
/// assert!((tone.next().unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Tone {
    frequency: Param,
    rate: f64,
    phase: f64,
    remaining: Option<usize>,
}

impl Tone {
    /// Creates an endless tone at `frequency` Hz.
    pub fn new(rate: FrameRate, frequency: impl Into<Param>) -> Self {
        Self {
            frequency: frequency.into(),
            rate: rate.as_f64(),
            phase: 0.0,
            remaining: None,
        }
    }

    /// Creates a tone lasting `round(seconds * rate)` samples.
    pub fn with_duration(rate: FrameRate, frequency: impl Into<Param>, seconds: f64) -> Self {
        Self {
            remaining: Some(rate.frames(seconds)),
            ..Self::new(rate, frequency)
        }
    }

    /// Current phase, in cycles within `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

impl Iterator for Tone {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == Some(0) {
            return None;
        }
        let frequency = self.frequency.value()?;
        if let Some(n) = &mut self.remaining {
            *n -= 1;
        }

        let sample = (TAU * self.phase).sin();
        self.phase += frequency / self.rate;
        self.phase -= self.phase.floor();
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let hint = self.frequency.size_hint();
        match self.remaining {
            None => hint,
            Some(n) => (hint.0.min(n), Some(hint.1.map_or(n, |u| u.min(n)))),
        }
    }
}

/// A sine tone, endless when `seconds` is `None`; see [`Tone`].
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, generators::tone};
///
/// let sweep = (0..).map(|n| f64::from(n % 10));
/// let samples: Vec<f64> = tone(FrameRate::default(), lazytone::Param::modulated(sweep), Some(0.2))
///     .collect();
/// assert_eq!(samples.len(), 8820);
/// ```
pub fn tone(rate: FrameRate, frequency: impl Into<Param>, seconds: Option<f64>) -> Tone {
    match seconds {
        Some(seconds) => Tone::with_duration(rate, frequency, seconds),
        None => Tone::new(rate, frequency),
    }
}

/// A short notification tone: a sine cropped to `seconds` with 10 ms fades.
///
/// Use [`DEFAULT_FREQUENCY`] and [`BEEP_SECONDS`] for the stock beep.
///
/// # Examples
///
/// ```
/// use lazytone::FrameRate;
/// use lazytone::generators::{BEEP_SECONDS, DEFAULT_FREQUENCY, beep};
///
/// let samples: Vec<f64> = beep(FrameRate::default(), DEFAULT_FREQUENCY, BEEP_SECONDS).collect();
/// assert_eq!(samples.len(), 11025);
/// ```
pub fn beep(rate: FrameRate, frequency: impl Into<Param>, seconds: f64) -> CropWithFades<Tone> {
    let fade = rate.frames(BEEP_FADE_SECONDS);
    CropWithFades::new(Tone::new(rate, frequency), rate.frames(seconds), fade, fade)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> Param {
        Param::modulated((0u32..).map(|n| f64::from(n % 10)))
    }

    #[test]
    fn test_fixed_tone_first_samples() {
        let samples: Vec<f64> = Tone::new(FrameRate::default(), 440.0).take(5).collect();
        let expected = [
            0.0,
            0.06264832417874368,
            0.1250505236945281,
            0.18696144082725336,
            0.2481378479437379,
        ];
        for (a, e) in samples.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{a} != {e}");
        }
    }

    #[test]
    fn test_fixed_tone_length() {
        let samples: Vec<f64> = tone(FrameRate::default(), DEFAULT_FREQUENCY, Some(0.2)).collect();
        assert_eq!(samples.len(), 8820);
        assert!(samples.iter().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn test_variable_tone() {
        let samples: Vec<f64> = tone(FrameRate::default(), sweep(), Some(0.2)).collect();
        assert_eq!(samples.len(), 8820);
        let total: f64 = samples.iter().sum();
        assert!((total - 299.2509532216738).abs() < 1e-6, "{total}");
    }

    #[test]
    fn test_modulated_frequency_ends_tone() {
        let short = Param::modulated(vec![440.0; 3].into_iter());
        let tone = Tone::new(FrameRate::default(), short);
        assert_eq!(tone.size_hint(), (3, Some(3)));
        assert_eq!(tone.count(), 3);
    }

    #[test]
    fn test_endless_tone() {
        let tone = tone(FrameRate::default(), 440.0, None);
        assert_eq!(tone.size_hint(), (usize::MAX, None));
        assert_eq!(tone.take(100_000).count(), 100_000);
    }

    #[test]
    fn test_phase_wrapping() {
        let mut tone = Tone::new(FrameRate::default(), 1000.0);
        for _ in 0..100_000 {
            tone.next();
        }
        assert!((0.0..1.0).contains(&tone.phase()));
    }

    #[test]
    fn test_zero_frequency() {
        let mut tone = Tone::new(FrameRate::default(), 0.0);
        assert_eq!(tone.next(), tone.next());
    }

    #[test]
    fn test_beep_shape() {
        let samples: Vec<f64> = beep(FrameRate::default(), DEFAULT_FREQUENCY, 2.0).collect();
        assert_eq!(samples.len(), 88200);
        assert_eq!(samples[0], 0.0);
        assert!(samples.last().unwrap().abs() < 0.01);
        let total: f64 = samples.iter().sum();
        assert!(total.abs() < 1e-6, "{total}");
    }

    #[test]
    fn test_default_beep_length() {
        let rate = FrameRate::new(8000);
        assert_eq!(beep(rate, DEFAULT_FREQUENCY, BEEP_SECONDS).count(), 2000);
    }
}
