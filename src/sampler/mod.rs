//! Turning float signals into 16-bit PCM bytes, WAV streams and sound.
//!
//! The path from signal to output is quantize, interleave, encode: each
//! channel is quantized with [`sample`], channels are interleaved into frames
//! with [`wav_samples`], and frames are written behind a RIFF/WAVE header by
//! [`write_wav`] or [`stream_wav`], or rendered live with [`play`].

mod frames;
mod playback;
mod quantize;
mod wav;

pub use frames::{Buffer, Interleave, buffer, interleave, wav_samples, wav_samples_raw};
pub use playback::{PlaybackSink, default_sink, play, play_on, playback_available};
pub use quantize::{Quantize, quantize_sample, sample, sample_all};
pub use wav::{
    HEADER_LEN, HeaderState, MAX_DATA_BYTES, PcmFormat, SAMPLE_WIDTH, WavSummary,
    file_is_seekable, stream_wav, write_wav,
};
