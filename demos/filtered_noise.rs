//! Renders band-filtered noise to a WAV file.
//!
//! Usage: cargo run --example filtered_noise [output.wav]
//!
//! Two seconds of white noise through a band-pass at 1 kHz sweep into red
//! noise with a notch, each faded in and out.

use anyhow::Result;
use lazytone::filters::FilterExt;
use lazytone::noise::{Arcfour, WhiteNoise, red_noise};
use lazytone::sampler::write_wav;
use lazytone::{FrameRate, SignalExt};
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "filtered_noise.wav".into());
    let rate = FrameRate::default();

    let hiss = WhiteNoise::with_rng(Arcfour::with_drop("filtered noise")?)
        .band_pass(rate, 1000.0, 80.0)
        .crop_with_fades(rate, 2.0, 0.1, 0.1);
    let rumble = red_noise()
        .band_stop(rate, 120.0, 30.0)
        .volume(-3.0)
        .crop_with_fades(rate, 2.0, 0.1, 0.1);
    let track = hiss.chain(rumble).hard_clip(-1.0, 1.0);

    let mut writer = BufWriter::new(File::create(&path)?);
    let summary = write_wav(&mut writer, rate, vec![track])?;
    println!("{path}: {} frames", summary.frames);
    Ok(())
}
