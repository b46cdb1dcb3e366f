//! Live playback of PCM frames on an audio output device.
//!
//! Devices are reached through the [`PlaybackSink`] trait. The `playback`
//! feature provides a `cpal` backend; without it [`default_sink`] reports
//! playback as unavailable.

use tracing::info;

use super::frames::wav_samples;
use super::wav::PcmFormat;
use crate::error::Result;
use crate::{FrameRate, Signal};

/// Something that can render interleaved 16-bit PCM frames.
pub trait PlaybackSink {
    /// Plays `frames` to completion; blocks until the last frame is rendered.
    fn play(&mut self, format: PcmFormat, frames: &mut dyn Iterator<Item = Vec<u8>>)
    -> Result<()>;
}

/// Reports whether [`play`] can reach an output device.
pub fn playback_available() -> bool {
    #[cfg(feature = "playback")]
    {
        device::CpalSink::open_default().is_ok()
    }
    #[cfg(not(feature = "playback"))]
    {
        false
    }
}

/// Opens the default output device.
pub fn default_sink() -> Result<Box<dyn PlaybackSink>> {
    #[cfg(feature = "playback")]
    {
        Ok(Box::new(device::CpalSink::open_default()?))
    }
    #[cfg(not(feature = "playback"))]
    {
        Err(crate::Error::PlaybackUnavailable(
            "built without the `playback` feature".into(),
        ))
    }
}

/// Plays `channels` on the default output device, blocking until done.
///
/// Endless channels play until the process stops.
pub fn play<S: Signal>(rate: FrameRate, channels: Vec<S>) -> Result<()> {
    let mut sink = default_sink()?;
    play_on(sink.as_mut(), rate, channels)
}

/// Plays `channels` on a specific sink.
pub fn play_on<S: Signal>(
    sink: &mut dyn PlaybackSink,
    rate: FrameRate,
    channels: Vec<S>,
) -> Result<()> {
    let format = PcmFormat::new(rate, channels.len())?;
    info!(channels = format.channels, hz = rate.hz(), "starting playback");
    sink.play(format, &mut wav_samples(channels))?;
    info!("playback finished");
    Ok(())
}

/// Hands samples to a device callback through a bounded queue.
#[cfg(any(feature = "playback", test))]
mod feeder {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc::{SyncSender, TrySendError};
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::error::{Error, Result};

    /// How often a blocked feeder rechecks the stream.
    const POLL_INTERVAL: Duration = Duration::from_millis(10);

    /// Progress shared between the thread feeding a stream and the device
    /// callbacks.
    #[derive(Debug, Default)]
    pub(super) struct StreamStatus {
        drained: AtomicBool,
        failure: Mutex<Option<String>>,
    }

    impl StreamStatus {
        pub(super) fn fail(&self, reason: String) {
            if let Ok(mut failure) = self.failure.lock() {
                failure.get_or_insert(reason);
            }
        }

        pub(super) fn check(&self) -> Result<()> {
            match self.failure.lock() {
                Ok(failure) => match failure.as_ref() {
                    Some(reason) => Err(Error::Playback(reason.clone())),
                    None => Ok(()),
                },
                Err(_) => Err(Error::Playback("stream status poisoned".into())),
            }
        }

        pub(super) fn mark_drained(&self) {
            self.drained.store(true, Ordering::SeqCst);
        }

        pub(super) fn is_drained(&self) -> bool {
            self.drained.load(Ordering::SeqCst)
        }
    }

    /// Pushes every sample of `frames` into `tx` without blocking on a stalled
    /// consumer.
    ///
    /// Gives up with [`Error::Playback`] once `status` records a failure or the
    /// queue stays full for `stall`.
    pub(super) fn feed(
        tx: SyncSender<i16>,
        frames: &mut dyn Iterator<Item = Vec<u8>>,
        status: &StreamStatus,
        stall: Duration,
    ) -> Result<()> {
        for frame in frames {
            for pair in frame.chunks_exact(2) {
                let mut sample = i16::from_le_bytes([pair[0], pair[1]]);
                let mut blocked_since: Option<Instant> = None;
                loop {
                    match tx.try_send(sample) {
                        Ok(()) => break,
                        Err(TrySendError::Full(pending)) => {
                            status.check()?;
                            let since = *blocked_since.get_or_insert_with(Instant::now);
                            if since.elapsed() >= stall {
                                return Err(Error::Playback("output stream stalled".into()));
                            }
                            sample = pending;
                            thread::sleep(POLL_INTERVAL);
                        }
                        Err(TrySendError::Disconnected(_)) => {
                            status.check()?;
                            return Err(Error::Playback("output stream closed".into()));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Waits until the device has consumed the queue, at most `timeout`.
    pub(super) fn wait_drained(status: &StreamStatus, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while !status.is_drained() {
            status.check()?;
            if Instant::now() >= deadline {
                return Err(Error::Playback("output stream did not drain".into()));
            }
            thread::sleep(POLL_INTERVAL);
        }
        status.check()
    }
}

#[cfg(feature = "playback")]
mod device {
    use std::sync::Arc;
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::time::Duration;

    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{
        BufferSize, Device, FromSample, SampleFormat, SampleRate, SizedSample, Stream,
        StreamConfig,
    };
    use tracing::{debug, error};

    use super::PlaybackSink;
    use super::feeder::{StreamStatus, feed, wait_drained};
    use crate::error::{Error, Result};
    use crate::sampler::PcmFormat;

    /// Samples queued ahead of the device callback.
    const BACKLOG_SAMPLES: usize = 16 * 1024;

    /// Extra time granted on top of the backlog before a stream counts as
    /// stalled.
    const STALL_GRACE: Duration = Duration::from_secs(2);

    /// The host's default output device.
    pub(super) struct CpalSink {
        device: Device,
        preferred: SampleFormat,
    }

    impl CpalSink {
        pub(super) fn open_default() -> Result<Self> {
            let device = cpal::default_host()
                .default_output_device()
                .ok_or_else(|| Error::PlaybackUnavailable("no output device available".into()))?;
            let config = device
                .default_output_config()
                .map_err(|e| Error::PlaybackUnavailable(e.to_string()))?;
            let preferred = config.sample_format();
            if !is_supported(preferred) {
                return Err(Error::PlaybackUnavailable(format!(
                    "unsupported sample format: {preferred}"
                )));
            }
            Ok(Self { device, preferred })
        }

        /// Picks a sample format the device accepts at `format`'s rate and
        /// channel count, favouring the device default.
        fn sample_format(&self, format: PcmFormat) -> SampleFormat {
            let rate = SampleRate(format.frame_rate.hz());
            let offered: Vec<SampleFormat> = match self.device.supported_output_configs() {
                Ok(configs) => configs
                    .filter(|c| c.channels() == format.channels)
                    .filter(|c| c.min_sample_rate() <= rate && rate <= c.max_sample_rate())
                    .map(|c| c.sample_format())
                    .filter(|f| is_supported(*f))
                    .collect(),
                Err(err) => {
                    debug!(%err, "could not list output configs");
                    Vec::new()
                }
            };
            if offered.is_empty() || offered.contains(&self.preferred) {
                self.preferred
            } else {
                offered[0]
            }
        }

        fn build_stream<T>(
            &self,
            config: &StreamConfig,
            rx: Receiver<i16>,
            status: Arc<StreamStatus>,
        ) -> Result<Stream>
        where
            T: SizedSample + FromSample<i16>,
        {
            let callback_status = status.clone();
            self.device
                .build_output_stream(
                    config,
                    move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                        for out in data.iter_mut() {
                            *out = match rx.try_recv() {
                                Ok(sample) => T::from_sample(sample),
                                Err(TryRecvError::Empty) => T::from_sample(0i16),
                                Err(TryRecvError::Disconnected) => {
                                    callback_status.mark_drained();
                                    T::from_sample(0i16)
                                }
                            };
                        }
                    },
                    move |err| {
                        error!(%err, "audio stream error");
                        status.fail(err.to_string());
                    },
                    None,
                )
                .map_err(|e| Error::Playback(e.to_string()))
        }
    }

    fn is_supported(format: SampleFormat) -> bool {
        matches!(format, SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16)
    }

    impl PlaybackSink for CpalSink {
        fn play(
            &mut self,
            format: PcmFormat,
            frames: &mut dyn Iterator<Item = Vec<u8>>,
        ) -> Result<()> {
            let config = StreamConfig {
                channels: format.channels,
                sample_rate: SampleRate(format.frame_rate.hz()),
                buffer_size: BufferSize::Default,
            };

            let (tx, rx) = mpsc::sync_channel::<i16>(BACKLOG_SAMPLES);
            let status = Arc::new(StreamStatus::default());

            let sample_format = self.sample_format(format);
            let stream = match sample_format {
                SampleFormat::F32 => self.build_stream::<f32>(&config, rx, status.clone())?,
                SampleFormat::I16 => self.build_stream::<i16>(&config, rx, status.clone())?,
                SampleFormat::U16 => self.build_stream::<u16>(&config, rx, status.clone())?,
                other => {
                    return Err(Error::Playback(format!("unsupported sample format: {other}")));
                }
            };
            stream.play().map_err(|e| Error::Playback(e.to_string()))?;
            debug!(?config, %sample_format, "output stream running");

            let backlog = BACKLOG_SAMPLES as f64
                / (f64::from(format.channels) * f64::from(format.frame_rate.hz()));
            let timeout = Duration::from_secs_f64(backlog) + STALL_GRACE;

            feed(tx, frames, &status, timeout)?;
            wait_drained(&status, timeout)
        }
    }
}
