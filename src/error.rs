//! Error type shared by the fallible parts of the pipeline.
//!
//! Signal generation itself never fails: truncation, clamping and filter
//! preconditions are defined behavior. Errors only surface at the edges, when
//! keying a noise source or handing bytes to a sink or playback device.

use thiserror::Error;

/// Errors produced by lazytone.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O failure from the output sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An encoder was given zero channels.
    #[error("at least one channel is required")]
    NoChannels,

    /// More channels than a WAV header can describe.
    #[error("{0} channels exceed the WAV limit of 65535")]
    TooManyChannels(usize),

    /// A keystream generator was keyed with an empty key.
    #[error("keystream key must not be empty")]
    EmptyKey,

    /// No playback backend is compiled in or no output device exists.
    #[error("audio playback is unavailable: {0}")]
    PlaybackUnavailable(String),

    /// The playback backend failed while building or running a stream.
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
