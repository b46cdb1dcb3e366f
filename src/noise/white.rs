//! White noise from a byte keystream.

use rand::RngCore;

use super::arcfour::Arcfour;

/// A white noise generator.
///
/// Each sample consumes two bytes from the random source, first byte high,
/// read as an offset-binary 16-bit value and mapped onto `[-1, 1)`. With the
/// default [`Arcfour`] source the stream is fully reproducible.
///
/// # Examples
///
/// ```
/// use lazytone::noise::WhiteNoise;
///
/// let first = WhiteNoise::new().next().unwrap();
/// assert_eq!(first, 0.392364501953125);
/// ```
#[derive(Debug, Clone)]
pub struct WhiteNoise<R: RngCore = Arcfour> {
    rng: R,
}

impl WhiteNoise<Arcfour> {
    /// Creates a white noise generator keyed with the default noise key.
    pub fn new() -> Self {
        Self::with_rng(Arcfour::default())
    }
}

impl Default for WhiteNoise<Arcfour> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> WhiteNoise<R> {
    /// Creates a white noise generator drawing from a custom random source.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazytone::noise::{Arcfour, WhiteNoise};
    ///
    /// let noise = WhiteNoise::with_rng(Arcfour::new("seed").unwrap());
    /// assert!(noise.take(100).all(|x| (-1.0..1.0).contains(&x)));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> Iterator for WhiteNoise<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let mut pair = [0u8; 2];
        self.rng.fill_bytes(&mut pair);
        let offset = i32::from(u16::from_be_bytes(pair)) - 32768;
        Some(f64::from(offset) / 32768.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// The white noise keystream as raw two-byte pairs.
///
/// Feeds the pre-quantized sampler path
/// ([`wav_samples_raw`](crate::sampler::wav_samples_raw)) without a
/// round trip through floating point.
#[derive(Debug, Clone)]
pub struct WhiteNoiseSamples<R: RngCore = Arcfour> {
    rng: R,
}

impl WhiteNoiseSamples<Arcfour> {
    /// Creates a raw sample stream keyed with the default noise key.
    pub fn new() -> Self {
        Self::with_rng(Arcfour::default())
    }
}

impl Default for WhiteNoiseSamples<Arcfour> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> WhiteNoiseSamples<R> {
    /// Creates a raw sample stream drawing from a custom random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> Iterator for WhiteNoiseSamples<R> {
    type Item = [u8; 2];

    fn next(&mut self) -> Option<[u8; 2]> {
        let mut pair = [0u8; 2];
        self.rng.fill_bytes(&mut pair);
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Endless, reproducible white noise; see [`WhiteNoise`].
pub fn white_noise() -> WhiteNoise {
    WhiteNoise::new()
}

/// Endless raw white noise byte pairs; see [`WhiteNoiseSamples`].
pub fn white_noise_samples() -> WhiteNoiseSamples {
    WhiteNoiseSamples::new()
}
