//! Deterministic noise sources.
//!
//! All generators draw their randomness from a byte keystream, by default an
//! [`Arcfour`] instance keyed with [`DEFAULT_NOISE_KEY`], so the same program
//! always produces the same noise. Any [`rand::RngCore`] can be substituted.

mod arcfour;
mod red;
mod white;

pub use arcfour::{ARCFOUR_DROP, Arcfour, DEFAULT_NOISE_KEY, arcfour, arcfour_drop};
pub use red::{RedNoise, red_noise};
pub use white::{WhiteNoise, WhiteNoiseSamples, white_noise, white_noise_samples};
