//! Float to 16-bit PCM quantization.

use crate::Signal;

/// Full-scale value of a 16-bit sample.
const FULL_SCALE: f64 = 32767.0;

/// Quantizes one sample: clamps to `[-1, 1]` and truncates `x * 32767`
/// towards zero.
///
/// # Examples
///
/// ```
/// use lazytone::sampler::quantize_sample;
///
/// assert_eq!(quantize_sample(1.0), 32767);
/// assert_eq!(quantize_sample(-4.0), -32767);
/// assert_eq!(quantize_sample(0.5), 16383);
/// ```
pub fn quantize_sample(x: f64) -> i16 {
    (x.clamp(-1.0, 1.0) * FULL_SCALE) as i16
}

/// A signal quantized to little-endian 16-bit sample bytes.
#[derive(Debug, Clone)]
pub struct Quantize<S> {
    source: S,
}

impl<S: Signal> Iterator for Quantize<S> {
    type Item = [u8; 2];

    fn next(&mut self) -> Option<[u8; 2]> {
        self.source.next().map(|x| quantize_sample(x).to_le_bytes())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Quantizes a signal to 16-bit little-endian samples.
///
/// Out-of-range values are clamped, never rejected.
///
/// # Examples
///
/// ```
/// use lazytone::sampler::sample;
///
/// let bytes: Vec<[u8; 2]> = sample(vec![0.0, 1.0, -1.0].into_iter()).collect();
/// assert_eq!(bytes, vec![[0, 0], [0xff, 0x7f], [0x01, 0x80]]);
/// ```
pub fn sample<S: Signal>(source: S) -> Quantize<S> {
    Quantize { source }
}

/// Quantizes every signal independently.
pub fn sample_all<S: Signal>(sources: impl IntoIterator<Item = S>) -> Vec<Quantize<S>> {
    sources.into_iter().map(sample).collect()
}
