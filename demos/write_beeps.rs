//! Writes a two-channel WAV file of beeps.
//!
//! Usage: cargo run --example write_beeps [output.wav]
//!
//! The left channel beeps at 440 Hz and the right at 875 Hz. Pass `-` as the
//! path to stream the WAV to stdout instead, e.g. into `aplay`.

use anyhow::{Context, Result};
use lazytone::generators::{DEFAULT_FREQUENCY, beep, silence};
use lazytone::sampler::{stream_wav, write_wav};
use lazytone::{BoxedSignal, FrameRate, SignalExt};
use std::fs::File;
use std::io::{BufWriter, stdout};

fn channel(rate: FrameRate, frequency: f64) -> BoxedSignal {
    // beep, pause, beep
    beep(rate, frequency, 0.25)
        .chain(silence(rate, 0.25))
        .chain(beep(rate, frequency, 0.5))
        .boxed()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "beeps.wav".into());
    let rate = FrameRate::default();
    let channels = vec![channel(rate, DEFAULT_FREQUENCY), channel(rate, 875.0)];

    let summary = if path == "-" {
        stream_wav(&mut stdout().lock(), rate, channels)?
    } else {
        let file = File::create(&path).with_context(|| format!("failed to create {path}"))?;
        let mut writer = BufWriter::new(file);
        write_wav(&mut writer, rate, channels)?
    };

    eprintln!(
        "wrote {} frames ({} bytes, header {:?})",
        summary.frames,
        summary.total_bytes(),
        summary.header
    );
    Ok(())
}
