use std::io::{Cursor, Write};

use lazytone::combinators::sum;
use lazytone::filters::FilterExt;
use lazytone::generators::{Partial, beep, silence, synth, tone};
use lazytone::noise::{red_noise, white_noise, white_noise_samples};
use lazytone::sampler::{HeaderState, stream_wav, wav_samples, wav_samples_raw, write_wav};
use lazytone::{FrameRate, SignalExt};

#[test]
fn test_silence_end_to_end() {
    let samples: Vec<f64> = silence(FrameRate::new(1), 5.0).collect();
    assert_eq!(samples.len(), 5);
    assert_eq!(samples.iter().sum::<f64>(), 0.0);
}

#[test]
fn test_stereo_beeps_to_file() {
    let rate = FrameRate::default();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let channels = vec![beep(rate, 440.0, 1.0), beep(rate, 875.0, 1.0)];
    let summary = write_wav(file.as_file_mut(), rate, channels).unwrap();

    assert_eq!(summary.header, HeaderState::Finalized);
    assert_eq!(summary.declared_data_bytes, summary.data_bytes);
    assert_eq!(summary.data_bytes, 44_100 * 4);

    let reader = hound::WavReader::open(file.path()).unwrap();
    let format = reader.spec();
    assert_eq!(format.channels, 2);
    assert_eq!(format.sample_rate, 44_100);
    assert_eq!(format.bits_per_sample, 16);
    assert_eq!(format.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.duration(), 44_100);

    let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
    let left: Vec<i16> = samples.iter().step_by(2).copied().take(10).collect();
    let right: Vec<i16> = samples.iter().skip(1).step_by(2).copied().take(10).collect();
    assert_eq!(left[0], 0);
    assert_eq!(right[0], 0);
    assert_ne!(left, right);
}

#[test]
fn test_finalized_file_matches_frames() {
    let rate = FrameRate::new(8000);
    let mut cursor = Cursor::new(Vec::new());
    write_wav(&mut cursor, rate, vec![tone(rate, 440.0, Some(0.5))]).unwrap();

    let expected: Vec<u8> = wav_samples(vec![tone(rate, 440.0, Some(0.5))])
        .flatten()
        .collect();
    assert_eq!(&cursor.get_ref()[44..], expected.as_slice());
}

#[test]
fn test_sink_stays_usable_after_write() {
    let rate = FrameRate::new(8000);
    let mut cursor = Cursor::new(Vec::new());
    let summary = write_wav(&mut cursor, rate, vec![tone(rate, 440.0, Some(0.1))]).unwrap();

    cursor.write_all(b"tail").unwrap();
    let bytes = cursor.get_ref();
    assert_eq!(bytes.len() as u64, summary.total_bytes() + 4);
    assert_eq!(&bytes[bytes.len() - 4..], b"tail");
}

#[test]
fn test_streamed_output_is_readable() {
    let rate = FrameRate::new(22_050);
    let mut pipe = Vec::new();
    let noise = white_noise().volume(-6.0).crop(rate, 0.2);
    let summary = stream_wav(&mut pipe, rate, vec![noise]).unwrap();

    assert_eq!(summary.header, HeaderState::Estimated);
    assert_eq!(summary.declared_data_bytes, summary.data_bytes);

    let reader = hound::WavReader::new(Cursor::new(pipe)).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.duration(), 4410);
}

#[test]
fn test_filtered_noise_mix() {
    let rate = FrameRate::default();
    let low = red_noise().band_pass(rate, 200.0, 50.0).boxed();
    let high = white_noise().band_stop(rate, 1000.0, 100.0).volume(-20.0).boxed();
    let mixed: Vec<f64> = sum(vec![low, high])
        .hard_clip(-1.0, 1.0)
        .crop_at_zero_crossing(rate, 0.1, 0.01)
        .collect();

    assert!(mixed.len() >= 4410);
    assert!(mixed.len() <= 4410 + 441);
    assert!(mixed.iter().all(|x| (-1.0..=1.0).contains(x)));
}

#[test]
fn test_raw_noise_channels() {
    let rate = FrameRate::new(1000);
    let frames: Vec<u8> = wav_samples_raw(vec![
        white_noise_samples().take(100),
        white_noise_samples().take(100),
    ])
    .flatten()
    .collect();
    assert_eq!(frames.len(), 400);
    assert_eq!(&frames[..4], &[178, 57, 178, 57]);

    let organ = synth(rate, 110.0, &[Partial::new(2.0, 0.5)], Some(0.1));
    let mut cursor = Cursor::new(Vec::new());
    let summary = write_wav(&mut cursor, rate, vec![organ]).unwrap();
    assert_eq!(summary.frames, 100);
}
