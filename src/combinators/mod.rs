//! Signal combinators for cropping, shaping and combining sample sequences.
//!
//! Every combinator is a small struct holding its input and the minimum state
//! it needs, advanced one sample per `next()`. Combinators that pair a signal
//! with a [`Param`] or with other sequences end as soon as the shorter operand
//! ends; nothing is padded and length mismatches are never an error.

mod crop;
mod level;
mod reduce;

pub use crop::{
    Crop, CropWithFades, ZERO_CROSSING_WINDOW_SECONDS, ZeroCrossingCrop, crop,
    crop_at_zero_crossing, crop_with, crop_with_fade_out, crop_with_fades,
};
pub use level::{
    BYTE_WIDTH, Clip, Envelope, HardClip, Normalize, Volume, clip, envelope, hard_clip,
    normalize, normalize_width, volume,
};
pub(crate) use reduce::lockstep_hint;
pub use reduce::{Sum, VectorReduce, VectorReduce1, sum, vector_reduce, vector_reduce1};

use crate::{BoxedSignal, FrameRate, Param, Signal};

/// Extension trait providing combinator methods on any Signal.
///
/// This trait is automatically implemented for all types that implement
/// `Signal`, providing a fluent API for chaining operations together.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, SignalExt, generators::Tone};
///
/// let rate = FrameRate::default();
/// let quiet_blip: Vec<f64> = Tone::new(rate, 440.0)
///     .volume(-6.0)
///     .crop_with_fades(rate, 0.1, 0.01, 0.01)
///     .collect();
/// assert_eq!(quiet_blip.len(), 4410);
/// ```
pub trait SignalExt: Signal + Sized {
    /// Keeps the first `seconds` of this signal.
    fn crop(self, rate: FrameRate, seconds: f64) -> Crop<Self> {
        crop(self, rate, seconds)
    }

    /// Keeps the first `seconds`, with linear fades at both ends.
    fn crop_with_fades(
        self,
        rate: FrameRate,
        seconds: f64,
        fade_in: f64,
        fade_out: f64,
    ) -> CropWithFades<Self> {
        crop_with_fades(self, rate, seconds, fade_in, fade_out)
    }

    /// Keeps the first `seconds`, fading out over the last `fade` seconds.
    fn crop_with_fade_out(self, rate: FrameRate, seconds: f64, fade: f64) -> CropWithFades<Self> {
        crop_with_fade_out(self, rate, seconds, fade)
    }

    /// Keeps roughly `seconds`, ending on a nearby zero crossing.
    fn crop_at_zero_crossing(
        self,
        rate: FrameRate,
        seconds: f64,
        error: f64,
    ) -> ZeroCrossingCrop<Self> {
        crop_at_zero_crossing(self, rate, seconds, error)
    }

    /// Applies a gain in decibels.
    fn volume(self, db: impl Into<Param>) -> Volume<Self> {
        volume(self, db)
    }

    /// Limits this signal to a ceiling.
    fn clip(self, ceiling: impl Into<Param>) -> Clip<Self> {
        clip(self, ceiling)
    }

    /// Multiplies this signal by a factor.
    fn envelope(self, factor: impl Into<Param>) -> Envelope<Self> {
        envelope(self, factor)
    }

    /// Clamps this signal to a range.
    fn hard_clip(self, min: f64, max: f64) -> HardClip<Self> {
        hard_clip(self, min, max)
    }

    /// Maps unsigned byte samples onto [-1, 1).
    fn normalize(self) -> Normalize<Self> {
        normalize(self)
    }

    /// Erases the concrete type, e.g. to mix different generators as channels.
    fn boxed(self) -> BoxedSignal
    where
        Self: Send + 'static,
    {
        Box::new(self)
    }
}

// Blanket implementation for all Signal types
impl<T: Signal> SignalExt for T {}
