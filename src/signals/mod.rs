//! Signal processing types and traits.
//!
//! This module provides the core abstractions used throughout the library:
//! - `Signal` trait for every lazy sample sequence
//! - `Param` type for fixed or modulated parameters
//! - `FrameRate` for converting between seconds and samples

mod audio;
mod core;

pub use self::audio::{DEFAULT_FRAME_RATE, FrameRate};
pub(crate) use self::core::shortest;
pub use self::core::{BoxedSignal, Param, Signal};
