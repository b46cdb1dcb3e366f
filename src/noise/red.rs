//! Red (Brownian) noise: a bounded random walk over keystream bytes.

use rand::RngCore;

use super::arcfour::Arcfour;

/// Scale of the walk: the accumulator stays within `[-WALK_LIMIT, WALK_LIMIT]`
/// and samples are `acc / WALK_LIMIT`.
const WALK_LIMIT: i32 = 1024;

/// A red noise generator.
///
/// Integrates steps of `byte - 128` drawn from the random source, so energy
/// is concentrated at low frequencies. A step that would carry the walk past
/// the limit is taken in the opposite direction instead, which keeps every
/// sample within `[-1, 1]`.
///
/// # Examples
///
/// ```
/// use lazytone::noise::RedNoise;
///
/// let walk: Vec<f64> = RedNoise::new().take(3).collect();
/// assert_eq!(walk, vec![0.048828125, -0.0205078125, -0.048828125]);
/// ```
#[derive(Debug, Clone)]
pub struct RedNoise<R: RngCore = Arcfour> {
    rng: R,
    acc: i32,
}

impl RedNoise<Arcfour> {
    /// Creates a red noise generator keyed with the default noise key.
    pub fn new() -> Self {
        Self::with_rng(Arcfour::default())
    }
}

impl Default for RedNoise<Arcfour> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> RedNoise<R> {
    /// Creates a red noise generator drawing from a custom random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng, acc: 0 }
    }
}

impl<R: RngCore> Iterator for RedNoise<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let mut byte = [0u8; 1];
        self.rng.fill_bytes(&mut byte);
        let step = i32::from(byte[0]) - 128;

        let forward = self.acc + step;
        self.acc = if forward.abs() > WALK_LIMIT {
            self.acc - step
        } else {
            forward
        };
        Some(f64::from(self.acc) / f64::from(WALK_LIMIT))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Endless, reproducible red noise; see [`RedNoise`].
pub fn red_noise() -> RedNoise {
    RedNoise::new()
}
