//! Cropping combinators: plain prefix crops, crops with linear fades and
//! crops that end on a zero crossing.

use std::collections::VecDeque;

use crate::{FrameRate, Signal};

/// Length of the window searched past the nominal end for a zero crossing.
pub const ZERO_CROSSING_WINDOW_SECONDS: f64 = 0.01;

/// Takes at most a fixed number of elements from a sequence.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, combinators::crop};
///
/// let cropped: Vec<f64> = crop((0..10).map(f64::from), FrameRate::new(1), 2.0).collect();
/// assert_eq!(cropped, vec![0.0, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Crop<S> {
    source: S,
    remaining: usize,
}

impl<S: Iterator> Crop<S> {
    /// Creates a crop of `frames` elements.
    pub fn new(source: S, frames: usize) -> Self {
        Self {
            source,
            remaining: frames,
        }
    }
}

impl<S: Iterator> Iterator for Crop<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.source.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        capped(self.source.size_hint(), self.remaining)
    }
}

/// Caps a `size_hint` at `limit` elements.
fn capped((lower, upper): (usize, Option<usize>), limit: usize) -> (usize, Option<usize>) {
    (
        lower.min(limit),
        Some(upper.map_or(limit, |u| u.min(limit))),
    )
}

/// Crops `source` to `round(seconds * rate)` samples.
pub fn crop<S: Signal>(source: S, rate: FrameRate, seconds: f64) -> Crop<S> {
    Crop::new(source, rate.frames(seconds))
}

/// Crops `source` using a caller-supplied slicing strategy.
///
/// The cropper receives the source and the nominal frame count; it may honor
/// the count or apply its own policy.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, combinators::crop_with};
///
/// let first_five = |source: std::vec::IntoIter<f64>, _frames: usize| source.take(5);
/// let out: Vec<f64> = crop_with(vec![0.0; 10].into_iter(), FrameRate::new(1), 1.0, first_five)
///     .collect();
/// assert_eq!(out.len(), 5);
/// ```
pub fn crop_with<S, I, F>(source: S, rate: FrameRate, seconds: f64, cropper: F) -> I
where
    S: Signal,
    F: FnOnce(S, usize) -> I,
{
    cropper(source, rate.frames(seconds))
}

/// Crops a signal and applies linear fade-in and fade-out ramps.
///
/// The first `fade_in` samples are scaled from 0 towards 1 and the last
/// `fade_out` samples of the cropped length from 1 towards 0. When the two
/// windows overlap the factors multiply, so every factor stays in [0, 1].
#[derive(Debug, Clone)]
pub struct CropWithFades<S: Signal> {
    source: S,
    index: usize,
    frames: usize,
    fade_in: usize,
    fade_out: usize,
}

impl<S: Signal> CropWithFades<S> {
    /// Creates a faded crop; all lengths are in samples.
    pub fn new(source: S, frames: usize, fade_in: usize, fade_out: usize) -> Self {
        Self {
            source,
            index: 0,
            frames,
            fade_in,
            fade_out,
        }
    }

    fn factor(&self, i: usize) -> f64 {
        let mut factor = 1.0;
        if i < self.fade_in {
            factor *= i as f64 / self.fade_in as f64;
        }
        let from_end = self.frames - i;
        if from_end <= self.fade_out {
            factor *= from_end as f64 / self.fade_out as f64;
        }
        factor
    }
}

impl<S: Signal> Iterator for CropWithFades<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.frames {
            return None;
        }
        let sample = self.source.next()?;
        let factor = self.factor(self.index);
        self.index += 1;
        Some(sample * factor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        capped(self.source.size_hint(), self.frames - self.index)
    }
}

/// Crops to `seconds` with `fade_in` and `fade_out` second ramps.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, combinators::crop_with_fades};
///
/// let numbers = (0..10).map(f64::from);
/// let out: Vec<f64> = crop_with_fades(numbers, FrameRate::new(1), 5.0, 2.0, 2.0).collect();
/// assert_eq!(out, vec![0.0, 0.5, 2.0, 3.0, 2.0]);
/// ```
pub fn crop_with_fades<S: Signal>(
    source: S,
    rate: FrameRate,
    seconds: f64,
    fade_in: f64,
    fade_out: f64,
) -> CropWithFades<S> {
    CropWithFades::new(
        source,
        rate.frames(seconds),
        rate.frames(fade_in),
        rate.frames(fade_out),
    )
}

/// Crops to `seconds` with only a fade-out ramp of `fade` seconds.
pub fn crop_with_fade_out<S: Signal>(
    source: S,
    rate: FrameRate,
    seconds: f64,
    fade: f64,
) -> CropWithFades<S> {
    CropWithFades::new(source, rate.frames(seconds), 0, rate.frames(fade))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrossingState {
    Body,
    Searching,
    Draining,
    Done,
}

/// Crops near a nominal length, preferring to end on a zero crossing.
///
/// After the nominal crop, up to `window` further samples are buffered while
/// looking for a sample within `error` of zero or one whose sign differs from
/// its predecessor. If one is found, the buffered samples through it are
/// emitted; otherwise the crop ends at the nominal length.
#[derive(Debug, Clone)]
pub struct ZeroCrossingCrop<S: Signal> {
    source: S,
    remaining: usize,
    window: usize,
    error: f64,
    previous: Option<f64>,
    lookahead: VecDeque<f64>,
    state: CrossingState,
}

impl<S: Signal> ZeroCrossingCrop<S> {
    /// Creates a zero-crossing crop; `frames` and `window` are in samples.
    pub fn new(source: S, frames: usize, window: usize, error: f64) -> Self {
        Self {
            source,
            remaining: frames,
            window,
            error,
            previous: None,
            lookahead: VecDeque::with_capacity(window),
            state: CrossingState::Body,
        }
    }

    fn is_crossing(&self, sample: f64) -> bool {
        if sample.abs() <= self.error {
            return true;
        }
        match self.previous {
            Some(prev) => prev != 0.0 && prev.signum() != sample.signum(),
            None => false,
        }
    }

    fn search(&mut self) -> CrossingState {
        while self.lookahead.len() < self.window {
            let Some(sample) = self.source.next() else {
                break;
            };
            let crossing = self.is_crossing(sample);
            self.lookahead.push_back(sample);
            self.previous = Some(sample);
            if crossing {
                return CrossingState::Draining;
            }
        }
        self.lookahead.clear();
        CrossingState::Done
    }
}

impl<S: Signal> Iterator for ZeroCrossingCrop<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        loop {
            match self.state {
                CrossingState::Body => {
                    if self.remaining == 0 {
                        self.state = match self.previous {
                            Some(last) if last.abs() > self.error => CrossingState::Searching,
                            _ => CrossingState::Done,
                        };
                        continue;
                    }
                    let Some(sample) = self.source.next() else {
                        self.state = CrossingState::Done;
                        return None;
                    };
                    self.remaining -= 1;
                    self.previous = Some(sample);
                    return Some(sample);
                }
                CrossingState::Searching => self.state = self.search(),
                CrossingState::Draining => match self.lookahead.pop_front() {
                    Some(sample) => return Some(sample),
                    None => self.state = CrossingState::Done,
                },
                CrossingState::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            CrossingState::Body => {
                let (lower, upper) = capped(self.source.size_hint(), self.remaining + self.window);
                (lower.min(self.remaining), upper)
            }
            CrossingState::Searching => (0, Some(self.window)),
            CrossingState::Draining => (self.lookahead.len(), Some(self.lookahead.len())),
            CrossingState::Done => (0, Some(0)),
        }
    }
}

/// Crops to roughly `seconds`, ending on a zero crossing when one is close.
///
/// The search window is 10 ms at `rate` (at least one sample).
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, combinators::crop_at_zero_crossing};
///
/// let samples = vec![2.0, 3.0, 4.0, 5.0, 3.0, 1.0, 3.0, 6.0, 0.0, 5.0, 4.0, 3.0];
/// let out: Vec<f64> =
///     crop_at_zero_crossing(samples.into_iter(), FrameRate::new(1), 10.0, 0.1).collect();
/// assert_eq!(out.len(), 10);
/// ```
pub fn crop_at_zero_crossing<S: Signal>(
    source: S,
    rate: FrameRate,
    seconds: f64,
    error: f64,
) -> ZeroCrossingCrop<S> {
    let window = rate.frames(ZERO_CROSSING_WINDOW_SECONDS).max(1);
    ZeroCrossingCrop::new(source, rate.frames(seconds), window, error)
}
