//! lazytone - lazy audio synthesis for Rust
//!
//! Signals are plain iterators of `f64` samples that are only computed as
//! they are pulled. Generators produce them, combinators and filters reshape
//! them, and the sampler quantizes them to 16-bit PCM and writes WAV streams
//! or plays them live.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use lazytone::{FrameRate, SignalExt};
//! use lazytone::{filters::FilterExt, generators::beep, noise::white_noise, sampler::write_wav};
//!
//! let rate = FrameRate::default();
//! let hiss = white_noise().band_pass(rate, 3000.0, 200.0).volume(-12.0).crop(rate, 0.25);
//! let tone = beep(rate, 440.0, 0.25);
//!
//! let mut file = Cursor::new(Vec::new());
//! let summary = write_wav(&mut file, rate, vec![hiss.boxed(), tone.boxed()]).unwrap();
//! assert_eq!(summary.frames, 11_025);
//! ```

pub mod combinators;
pub mod error;
pub mod filters;
pub mod generators;
pub mod noise;
pub mod sampler;
pub mod signals;

// Re-export commonly used types at the crate root
pub use combinators::SignalExt;
pub use error::{Error, Result};
pub use filters::FilterExt;
pub use sampler::{PcmFormat, WavSummary};
pub use signals::{BoxedSignal, DEFAULT_FRAME_RATE, FrameRate, Param, Signal};
