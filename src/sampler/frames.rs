//! Frame assembly: interleaving channels and chunking byte streams.

use super::quantize::{Quantize, sample};
use crate::Signal;
use crate::combinators::lockstep_hint;

/// Concatenates the i-th element of every input into one frame.
///
/// Ends with the shortest input.
#[derive(Debug, Clone)]
pub struct Interleave<I> {
    sources: Vec<I>,
}

impl<I> Iterator for Interleave<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if self.sources.is_empty() {
            return None;
        }
        let mut frame = Vec::new();
        for source in &mut self.sources {
            frame.extend_from_slice(source.next()?.as_ref());
        }
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        lockstep_hint(&self.sources)
    }
}

/// Interleaves byte-like elements from several sequences.
///
/// # Examples
///
/// ```
/// use lazytone::sampler::interleave;
///
/// let frames: Vec<Vec<u8>> = interleave(vec![b"abc".chunks(1), b"def".chunks(1)]).collect();
/// assert_eq!(frames, vec![b"ad".to_vec(), b"be".to_vec(), b"cf".to_vec()]);
/// ```
pub fn interleave<I>(sources: impl IntoIterator<Item = I>) -> Interleave<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    Interleave {
        sources: sources.into_iter().collect(),
    }
}

/// Groups a byte stream into chunks of a fixed size; the last may be shorter.
#[derive(Debug, Clone)]
pub struct Buffer<I> {
    bytes: I,
    size: usize,
}

impl<I: Iterator<Item = u8>> Iterator for Buffer<I> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        let chunk: Vec<u8> = self.bytes.by_ref().take(self.size).collect();
        if chunk.is_empty() { None } else { Some(chunk) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.bytes.size_hint();
        (
            lower.div_ceil(self.size),
            upper.map(|u| u.div_ceil(self.size)),
        )
    }
}

/// Chunks `bytes` into `size`-byte pieces.
///
/// # Panics
///
/// Panics if `size` is zero.
///
/// # Examples
///
/// ```
/// use lazytone::sampler::buffer;
///
/// let chunks: Vec<Vec<u8>> = buffer(b"abcdefg".iter().copied(), 3).collect();
/// assert_eq!(chunks, vec![b"abc".to_vec(), b"def".to_vec(), b"g".to_vec()]);
/// ```
pub fn buffer<I>(bytes: I, size: usize) -> Buffer<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    assert!(size > 0, "buffer size must be positive");
    Buffer {
        bytes: bytes.into_iter(),
        size,
    }
}

/// Quantizes and interleaves float channels into PCM frames.
pub fn wav_samples<S: Signal>(channels: impl IntoIterator<Item = S>) -> Interleave<Quantize<S>> {
    interleave(channels.into_iter().map(sample))
}

/// Interleaves channels that are already quantized to two-byte samples.
///
/// Pairs with [`white_noise_samples`](crate::noise::white_noise_samples).
pub fn wav_samples_raw<I>(channels: impl IntoIterator<Item = I>) -> Interleave<I>
where
    I: Iterator<Item = [u8; 2]>,
{
    interleave(channels)
}
