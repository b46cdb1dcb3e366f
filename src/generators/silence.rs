//! Silence generator.

use crate::FrameRate;

/// A run of zero-valued samples, either bounded or endless.
///
/// # Examples
///
/// ```
/// use lazytone::{FrameRate, generators::Silence};
///
/// let quiet: Vec<f64> = Silence::new(FrameRate::new(1), 5.0).collect();
/// assert_eq!(quiet, vec![0.0; 5]);
/// ```
#[derive(Debug, Clone)]
pub struct Silence {
    remaining: Option<usize>,
}

impl Silence {
    /// Creates `round(seconds * rate)` samples of silence.
    pub fn new(rate: FrameRate, seconds: f64) -> Self {
        Self {
            remaining: Some(rate.frames(seconds)),
        }
    }

    /// Creates silence that never ends.
    pub fn endless() -> Self {
        Self { remaining: None }
    }
}

impl Iterator for Silence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match &mut self.remaining {
            None => Some(0.0),
            Some(0) => None,
            Some(n) => {
                *n -= 1;
                Some(0.0)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            None => (usize::MAX, None),
            Some(n) => (n, Some(n)),
        }
    }
}

/// Zero samples lasting `seconds`; see [`Silence`].
pub fn silence(rate: FrameRate, seconds: f64) -> Silence {
    Silence::new(rate, seconds)
}
