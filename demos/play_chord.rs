//! Plays a short chord on the default output device.
//!
//! Usage: cargo run --example play_chord --features playback

use anyhow::Result;
use lazytone::combinators::sum;
use lazytone::generators::{Partial, synth};
use lazytone::sampler::{play, playback_available};
use lazytone::{FrameRate, SignalExt};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if !playback_available() {
        anyhow::bail!("no audio output device found");
    }

    let rate = FrameRate::default();
    let partials = [Partial::new(2.0, 0.4), Partial::new(3.0, 0.2)];
    // A major triad: root, major third, fifth.
    let voices = [261.63, 329.63, 392.0]
        .map(|f| synth(rate, f, &partials, None).envelope(1.0 / 3.0));

    let chord = sum(voices).crop_with_fades(rate, 2.0, 0.05, 0.5);
    let echo = sum([
        synth(rate, 130.81, &partials, None),
        synth(rate, 196.0, &partials, None),
    ])
    .envelope(0.5)
    .crop_with_fades(rate, 2.0, 0.3, 0.5);

    play(rate, vec![chord.boxed(), echo.boxed()])?;
    Ok(())
}
