//! RIFF/WAVE container encoding.
//!
//! The header declares the data length before the data is written. On a
//! seekable sink the writer leaves a placeholder, streams the frames and then
//! patches both size fields. On any other sink it declares an upper-bound
//! estimate up front, which most players accept for streamed audio.

use std::io::{self, Seek, SeekFrom, Write};

use tracing::{debug, warn};

use super::frames::{buffer, wav_samples};
use crate::combinators::Crop;
use crate::error::{Error, Result};
use crate::{FrameRate, Signal};

/// Bytes per sample; output is always 16-bit PCM.
pub const SAMPLE_WIDTH: u16 = 2;

/// Size of the canonical header written before the data.
pub const HEADER_LEN: usize = 44;

/// Largest data length a header may declare: the RIFF size field, which
/// counts the 36 header bytes after it, must stay below 2 GiB.
pub const MAX_DATA_BYTES: u32 = 0x7FFF_FFFF - 36;

/// Bytes handed to the sink per write.
const WRITE_CHUNK_BYTES: usize = 64 * 1024;

const RIFF_SIZE_OFFSET: u64 = 4;
const DATA_SIZE_OFFSET: u64 = 40;

/// `errno` for a seek on a pipe, socket or tty.
const ESPIPE: i32 = 29;

/// Layout of an encoded PCM stream.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, sampler::PcmFormat};
///
/// let stereo = PcmFormat::new(FrameRate::default(), 2).unwrap();
/// assert_eq!(stereo.block_align(), 4);
/// assert_eq!(stereo.byte_rate(), 176_400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub channels: u16,
    pub frame_rate: FrameRate,
}

impl PcmFormat {
    /// Describes `channels` interleaved 16-bit channels at `frame_rate`.
    ///
    /// Fails with [`Error::NoChannels`] or [`Error::TooManyChannels`] when the
    /// count cannot be encoded.
    pub fn new(frame_rate: FrameRate, channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(Error::NoChannels);
        }
        let channels = u16::try_from(channels).map_err(|_| Error::TooManyChannels(channels))?;
        Ok(Self {
            channels,
            frame_rate,
        })
    }

    /// Bytes per frame: one sample per channel.
    pub fn block_align(&self) -> u16 {
        self.channels * SAMPLE_WIDTH
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.frame_rate.hz() * u32::from(self.block_align())
    }

    /// Most frames whose data fits under [`MAX_DATA_BYTES`].
    pub fn max_frames(&self) -> usize {
        (MAX_DATA_BYTES / u32::from(self.block_align())) as usize
    }

    /// Serializes the 44-byte header declaring `data_bytes` of sample data.
    pub fn header(&self, data_bytes: u32) -> [u8; HEADER_LEN] {
        let mut header = [0u8; HEADER_LEN];
        let fields: [&[u8]; 13] = [
            b"RIFF",
            &(36 + data_bytes).to_le_bytes(),
            b"WAVE",
            b"fmt ",
            &16u32.to_le_bytes(),
            &1u16.to_le_bytes(),
            &self.channels.to_le_bytes(),
            &self.frame_rate.hz().to_le_bytes(),
            &self.byte_rate().to_le_bytes(),
            &self.block_align().to_le_bytes(),
            &(SAMPLE_WIDTH * 8).to_le_bytes(),
            b"data",
            &data_bytes.to_le_bytes(),
        ];
        let mut offset = 0;
        for field in fields {
            header[offset..offset + field.len()].copy_from_slice(field);
            offset += field.len();
        }
        header
    }
}

/// How the header's size fields were settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    /// Placeholder sizes; the data has not been fully written.
    Unbounded,
    /// Sizes patched to the exact amount written.
    Finalized,
    /// Sizes declared up front from the channels' length bounds.
    Estimated,
}

/// Outcome of encoding one WAV stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSummary {
    pub format: PcmFormat,
    /// Frames actually written.
    pub frames: u64,
    /// Sample data bytes actually written.
    pub data_bytes: u64,
    /// Sample data bytes declared in the header.
    pub declared_data_bytes: u64,
    pub header: HeaderState,
}

impl WavSummary {
    /// Total bytes written, header included.
    pub fn total_bytes(&self) -> u64 {
        HEADER_LEN as u64 + self.data_bytes
    }
}

/// Reports whether `stream` supports seeking.
///
/// A stream that reports its position is seekable. `ESPIPE` (pipes, ttys)
/// and [`io::ErrorKind::Unsupported`] mean it is not. Any other error is
/// returned unchanged.
pub fn file_is_seekable<S: Seek + ?Sized>(stream: &mut S) -> io::Result<bool> {
    match stream.stream_position() {
        Ok(_) => Ok(true),
        Err(err) if is_unseekable(&err) => Ok(false),
        Err(err) => Err(err),
    }
}

fn is_unseekable(err: &io::Error) -> bool {
    let espipe = cfg!(unix) && err.raw_os_error() == Some(ESPIPE);
    espipe || err.kind() == io::ErrorKind::Unsupported
}

/// Encodes `channels` as a WAV stream into a seekable sink.
///
/// The sink is probed with [`file_is_seekable`]; when seeking works the
/// header sizes are patched to the exact data length and the sink is left
/// positioned at the end of the data. Otherwise this falls back to
/// [`stream_wav`]. Channels end with the shortest one, and output stops at
/// [`PcmFormat::max_frames`] for endless inputs.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use lazytone::{FrameRate, generators::tone, sampler::{HeaderState, write_wav}};
///
/// let rate = FrameRate::default();
/// let mut file = Cursor::new(Vec::new());
/// let summary = write_wav(&mut file, rate, vec![tone(rate, 440.0, Some(0.1))]).unwrap();
/// assert_eq!(summary.header, HeaderState::Finalized);
/// assert_eq!(summary.frames, 4410);
/// assert_eq!(file.get_ref().len(), 44 + 4410 * 2);
/// ```
pub fn write_wav<W, S>(sink: &mut W, rate: FrameRate, channels: Vec<S>) -> Result<WavSummary>
where
    W: Write + Seek + ?Sized,
    S: Signal,
{
    let format = PcmFormat::new(rate, channels.len())?;
    if !file_is_seekable(sink)? {
        warn!("sink cannot seek, declaring an estimated data length");
        return stream_wav(sink, rate, channels);
    }

    let start = sink.stream_position()?;
    let mut state = HeaderState::Unbounded;
    debug!(?state, channels = format.channels, hz = rate.hz(), "writing placeholder header");
    sink.write_all(&format.header(0))?;

    let frames = Crop::new(wav_samples(channels), format.max_frames());
    let data_bytes = write_frames(sink, frames)?;
    // Bounded by max_frames, so the narrowing cannot truncate.
    let data_len = data_bytes as u32;

    let end = sink.stream_position()?;
    sink.seek(SeekFrom::Start(start + RIFF_SIZE_OFFSET))?;
    sink.write_all(&(36 + data_len).to_le_bytes())?;
    sink.seek(SeekFrom::Start(start + DATA_SIZE_OFFSET))?;
    sink.write_all(&data_len.to_le_bytes())?;
    sink.seek(SeekFrom::Start(end))?;
    state = HeaderState::Finalized;

    let summary = summarize(format, data_bytes, data_bytes, state);
    debug!(frames = summary.frames, data_bytes, "finalized header");
    Ok(summary)
}

/// Encodes `channels` as a WAV stream into a sink that cannot seek.
///
/// The declared data length is the shortest channel's upper length bound
/// when one is known, otherwise the largest length a header can declare.
/// Output never exceeds the declared length.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, generators::silence, sampler::{HeaderState, stream_wav}};
///
/// let rate = FrameRate::new(8000);
/// let mut pipe = Vec::new();
/// let summary = stream_wav(&mut pipe, rate, vec![silence(rate, 0.5)]).unwrap();
/// assert_eq!(summary.header, HeaderState::Estimated);
/// assert_eq!(summary.declared_data_bytes, summary.data_bytes);
/// ```
pub fn stream_wav<W, S>(sink: &mut W, rate: FrameRate, channels: Vec<S>) -> Result<WavSummary>
where
    W: Write + ?Sized,
    S: Signal,
{
    let format = PcmFormat::new(rate, channels.len())?;
    let frames = wav_samples(channels);
    let limit = format.max_frames();
    let declared_frames = frames.size_hint().1.map_or(limit, |upper| upper.min(limit));
    let declared = (declared_frames * usize::from(format.block_align())) as u32;

    debug!(
        state = ?HeaderState::Unbounded,
        declared_frames,
        channels = format.channels,
        hz = rate.hz(),
        "writing estimated header"
    );
    sink.write_all(&format.header(declared))?;
    let data_bytes = write_frames(sink, Crop::new(frames, declared_frames))?;

    let summary = summarize(format, data_bytes, u64::from(declared), HeaderState::Estimated);
    if summary.data_bytes < summary.declared_data_bytes {
        debug!(
            data_bytes,
            declared_data_bytes = summary.declared_data_bytes,
            "stream ended before its declared length"
        );
    }
    Ok(summary)
}

fn write_frames<W, I>(sink: &mut W, frames: I) -> io::Result<u64>
where
    W: Write + ?Sized,
    I: Iterator<Item = Vec<u8>>,
{
    let mut written = 0u64;
    for chunk in buffer(frames.flatten(), WRITE_CHUNK_BYTES) {
        sink.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    sink.flush()?;
    Ok(written)
}

fn summarize(format: PcmFormat, data_bytes: u64, declared: u64, header: HeaderState) -> WavSummary {
    WavSummary {
        format,
        frames: data_bytes / u64::from(format.block_align()),
        data_bytes,
        declared_data_bytes: declared,
        header,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Tone, beep};
    use std::io::Cursor;

    /// Write-only sink whose position queries fail with a fixed error.
    struct Unseekable {
        bytes: Vec<u8>,
        error: fn() -> io::Error,
    }

    impl Unseekable {
        #[cfg(unix)]
        fn pipe() -> Self {
            Self {
                bytes: Vec::new(),
                error: || io::Error::from_raw_os_error(ESPIPE),
            }
        }

        fn timing_out() -> Self {
            Self {
                bytes: Vec::new(),
                error: || io::Error::new(io::ErrorKind::TimedOut, "you should expect this too"),
            }
        }
    }

    impl Write for Unseekable {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for Unseekable {
        fn seek(&mut self, _: SeekFrom) -> io::Result<u64> {
            Err((self.error)())
        }
    }

    struct NoSeek;

    impl Seek for NoSeek {
        fn seek(&mut self, _: SeekFrom) -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no seeking here"))
        }
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn test_file_is_seekable() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(file_is_seekable(&mut cursor).unwrap());

        let mut file = tempfile::tempfile().unwrap();
        assert!(file_is_seekable(&mut file).unwrap());

        assert!(!file_is_seekable(&mut NoSeek).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_espipe_is_not_seekable() {
        assert!(!file_is_seekable(&mut Unseekable::pipe()).unwrap());
    }

    #[test]
    fn test_other_errors_propagate() {
        let err = file_is_seekable(&mut Unseekable::timing_out()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_header_layout() {
        let format = PcmFormat::new(FrameRate::default(), 2).unwrap();
        let header = format.header(1000);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(u32_at(&header, 4), 1036);
        assert_eq!(&header[8..16], b"WAVEfmt ");
        assert_eq!(u32_at(&header, 16), 16);
        assert_eq!(&header[20..24], &[1, 0, 2, 0]);
        assert_eq!(u32_at(&header, 24), 44_100);
        assert_eq!(u32_at(&header, 28), 176_400);
        assert_eq!(&header[32..36], &[4, 0, 16, 0]);
        assert_eq!(&header[36..40], b"data");
        assert_eq!(u32_at(&header, 40), 1000);
    }

    #[test]
    fn test_channel_count_validation() {
        let rate = FrameRate::default();
        assert!(matches!(PcmFormat::new(rate, 0), Err(Error::NoChannels)));
        assert!(matches!(
            PcmFormat::new(rate, 70_000),
            Err(Error::TooManyChannels(70_000))
        ));

        let no_channels: Vec<Tone> = Vec::new();
        let result = write_wav(&mut Cursor::new(Vec::new()), rate, no_channels);
        assert!(matches!(result, Err(Error::NoChannels)));
    }

    #[test]
    fn test_write_wav_finalizes_sizes() {
        let rate = FrameRate::default();
        let mut cursor = Cursor::new(Vec::new());
        let channels = vec![beep(rate, 440.0, 1.0), beep(rate, 875.0, 1.0)];
        let summary = write_wav(&mut cursor, rate, channels).unwrap();

        assert_eq!(summary.header, HeaderState::Finalized);
        assert_eq!(summary.frames, 44_100);
        assert_eq!(summary.data_bytes, 176_400);
        assert_eq!(summary.declared_data_bytes, 176_400);

        let bytes = cursor.get_ref();
        assert_eq!(bytes.len() as u64, summary.total_bytes());
        assert_eq!(u32_at(bytes, 4), 36 + 176_400);
        assert_eq!(u32_at(bytes, 40), 176_400);
        assert_eq!(cursor.position(), bytes.len() as u64);
    }

    #[test]
    fn test_write_wav_at_offset() {
        let rate = FrameRate::new(8000);
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_all(b"prefix").unwrap();
        let summary = write_wav(&mut cursor, rate, vec![Tone::with_duration(rate, 100.0, 0.01)])
            .unwrap();

        let bytes = &cursor.get_ref()[6..];
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u64::from(u32_at(bytes, 40)), summary.data_bytes);
        assert_eq!(summary.frames, 80);
    }

    #[test]
    fn test_write_wav_falls_back_when_unseekable() {
        let rate = FrameRate::new(100);
        let mut sink = Unseekable {
            bytes: Vec::new(),
            error: || io::Error::new(io::ErrorKind::Unsupported, "pipe"),
        };
        let summary = write_wav(&mut sink, rate, vec![Tone::with_duration(rate, 5.0, 1.0)])
            .unwrap();

        assert_eq!(summary.header, HeaderState::Estimated);
        assert_eq!(summary.declared_data_bytes, 200);
        assert_eq!(sink.bytes.len(), 44 + 200);
        assert_eq!(u32_at(&sink.bytes, 40), 200);
    }

    #[test]
    fn test_write_wav_propagates_probe_errors() {
        let rate = FrameRate::new(100);
        let result = write_wav(
            &mut Unseekable::timing_out(),
            rate,
            vec![Tone::with_duration(rate, 5.0, 1.0)],
        );
        assert!(matches!(result, Err(Error::Io(err)) if err.kind() == io::ErrorKind::TimedOut));
    }

    #[test]
    fn test_stream_wav_uses_shortest_bound() {
        let rate = FrameRate::new(1000);
        let mut sink = Vec::new();
        let channels = vec![
            Tone::with_duration(rate, 50.0, 0.5),
            Tone::with_duration(rate, 75.0, 0.25),
        ];
        let summary = stream_wav(&mut sink, rate, channels).unwrap();

        assert_eq!(summary.declared_data_bytes, 250 * 4);
        assert_eq!(summary.data_bytes, 250 * 4);
        assert_eq!(u32_at(&sink, 4), 36 + 1000);
        assert_eq!(sink.len(), 44 + 1000);
    }

    #[test]
    fn test_stream_wav_declares_upper_bound() {
        let rate = FrameRate::new(1000);
        // A filter only knows its length is at most 10.
        let channel = (0..10).map(f64::from).filter(|x| *x < 5.0);
        let mut sink = Vec::new();
        let summary = stream_wav(&mut sink, rate, vec![channel]).unwrap();
        assert_eq!(summary.declared_data_bytes, 20);
        assert_eq!(summary.data_bytes, 10);
        assert_eq!(sink.len(), 44 + 10);
    }

    /// Accepts a fixed number of bytes, then refuses further writes.
    struct Full {
        bytes: Vec<u8>,
        capacity: usize,
    }

    impl Write for Full {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.capacity - self.bytes.len();
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "sink full"));
            }
            let n = buf.len().min(room);
            self.bytes.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_wav_endless_declares_maximum() {
        let rate = FrameRate::new(1000);
        let mut sink = Full {
            bytes: Vec::new(),
            capacity: HEADER_LEN,
        };
        let result = stream_wav(&mut sink, rate, vec![Tone::new(rate, 10.0), Tone::new(rate, 20.0)]);
        assert!(matches!(result, Err(Error::Io(_))));

        let max_frames = (MAX_DATA_BYTES / 4) as usize;
        assert_eq!(PcmFormat::new(rate, 2).unwrap().max_frames(), max_frames);
        assert_eq!(u32_at(&sink.bytes, 40) as usize, max_frames * 4);
        assert!(u32_at(&sink.bytes, 4) <= 0x7FFF_FFFF);
    }
}
