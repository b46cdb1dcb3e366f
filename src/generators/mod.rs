//! Sample generators: silence, sine tones, beeps and additive synthesis.
//!
//! Every generator takes the [`FrameRate`](crate::FrameRate) it renders at and
//! is endless unless given a duration.

mod silence;
mod synth;
mod tone;

pub use silence::{Silence, silence};
pub use synth::{Partial, Synth, synth};
pub use tone::{BEEP_FADE_SECONDS, BEEP_SECONDS, DEFAULT_FREQUENCY, Tone, beep, tone};
