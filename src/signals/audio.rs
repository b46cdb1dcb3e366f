//! Frame rate configuration for time-aware generators and combinators.

/// The frame rate used when none is given: CD quality.
pub const DEFAULT_FRAME_RATE: u32 = 44_100;

/// Number of samples produced per second of audio.
///
/// Anything that converts between seconds and samples takes a `FrameRate`
/// explicitly, so pipelines running at different rates can coexist in one
/// process.
///
/// # Examples
///
/// ```
/// use lazytone::FrameRate;
///
/// let rate = FrameRate::default();
/// assert_eq!(rate.hz(), 44_100);
/// assert_eq!(rate.frames(0.5), 22_050);
///
/// // A rate of one sample per second makes second-based math easy to check.
/// assert_eq!(FrameRate::new(1).frames(5.0), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRate(u32);

impl FrameRate {
    /// Creates a frame rate.
    ///
    /// # Panics
    ///
    /// Panics if `hz` is zero.
    pub const fn new(hz: u32) -> Self {
        assert!(hz > 0, "frame rate must be positive");
        Self(hz)
    }

    /// The rate in samples per second.
    pub const fn hz(self) -> u32 {
        self.0
    }

    /// The rate as a float, for phase and coefficient math.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Converts a duration to a sample count, `round(seconds * hz)`.
    ///
    /// Negative and NaN durations map to zero samples.
    pub fn frames(self, seconds: f64) -> usize {
        let frames = (seconds * self.as_f64()).round();
        if frames > 0.0 { frames as usize } else { 0 }
    }

    /// Highest representable frequency at this rate.
    pub fn nyquist(self) -> f64 {
        self.as_f64() / 2.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(DEFAULT_FRAME_RATE)
    }
}

impl From<FrameRate> for u32 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}
