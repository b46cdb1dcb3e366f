//! Core signal trait and parameter types.
//!
//! A signal is any lazy sequence of samples. Rather than inventing a new
//! protocol, `Signal` is a trait alias over `Iterator<Item = f64>`, which gives
//! every combinator finite/infinite semantics, `size_hint` and the whole
//! standard iterator toolbox for free.

/// Common interface for all sample sources and processors.
///
/// Implemented automatically for every `Iterator<Item = f64>`, including boxed
/// trait objects, so generators, filters and combinators all compose freely.
///
/// # Examples
///
/// ```
/// use lazytone::Signal;
///
/// fn peak(signal: impl Signal) -> f64 {
///     signal.fold(0.0, |acc, x| acc.max(x.abs()))
/// }
///
/// assert_eq!(peak(vec![0.25, -0.5, 0.1].into_iter()), 0.5);
/// ```
pub trait Signal: Iterator<Item = f64> {}

impl<T: Iterator<Item = f64> + ?Sized> Signal for T {}

/// A type-erased signal, handy for heterogeneous channel lists.
pub type BoxedSignal = Box<dyn Signal + Send>;

/// A parameter that is either a fixed value or driven by another signal.
///
/// Used wherever a combinator or generator accepts "a number or a sequence":
/// volume in dB, clip ceiling, envelope factor, tone frequency. A fixed value
/// never runs out; a modulated parameter ends when its signal ends, which ends
/// the consumer too (the shorter operand wins).
///
/// # Examples
///
/// ```
/// use lazytone::Param;
///
/// let mut fixed: Param = 0.5.into();
/// assert_eq!(fixed.value(), Some(0.5));
///
/// let mut ramp = Param::modulated(vec![1.0, 2.0].into_iter());
/// assert_eq!(ramp.value(), Some(1.0));
/// assert_eq!(ramp.value(), Some(2.0));
/// assert_eq!(ramp.value(), None);
/// ```
pub enum Param {
    /// A fixed, constant value
    Fixed(f64),
    /// A value read from a signal, one element per sample
    Signal(BoxedSignal),
}

impl Param {
    /// Gets the current value of the parameter.
    ///
    /// For fixed parameters this is always `Some(value)`. For modulated
    /// parameters this advances the signal, returning `None` once it is
    /// exhausted.
    pub fn value(&mut self) -> Option<f64> {
        match self {
            Param::Fixed(v) => Some(*v),
            Param::Signal(s) => s.next(),
        }
    }

    /// Creates a fixed parameter with the given value.
    pub fn fixed(value: f64) -> Self {
        Param::Fixed(value)
    }

    /// Creates a parameter controlled by a signal.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazytone::{FrameRate, Param, generators::Tone};
    ///
    /// let lfo = Tone::new(FrameRate::default(), 2.0);
    /// let param = Param::modulated(lfo);
    /// assert!(!param.is_fixed());
    /// ```
    pub fn modulated(signal: impl Signal + Send + 'static) -> Self {
        Param::Signal(Box::new(signal))
    }

    /// Returns true if this parameter is fixed (non-modulated).
    pub fn is_fixed(&self) -> bool {
        matches!(self, Param::Fixed(_))
    }

    /// Bounds on the number of values this parameter can still produce.
    pub fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Param::Fixed(_) => (usize::MAX, None),
            Param::Signal(s) => s.size_hint(),
        }
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Fixed(value)
    }
}

impl From<BoxedSignal> for Param {
    fn from(signal: BoxedSignal) -> Self {
        Param::Signal(signal)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Param::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Param::Signal(_) => f.write_str("Signal(..)"),
        }
    }
}

/// Combines two `size_hint`s for sequences that are consumed in lockstep.
pub(crate) fn shortest(
    a: (usize, Option<usize>),
    b: (usize, Option<usize>),
) -> (usize, Option<usize>) {
    let upper = match (a.1, b.1) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    };
    (a.0.min(b.0), upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_to_param() {
        let param: Param = 0.5.into();
        match param {
            Param::Fixed(v) => assert_eq!(v, 0.5),
            Param::Signal(_) => panic!("Expected Fixed, got Signal"),
        }
    }

    #[test]
    fn test_signal_to_param() {
        let boxed: BoxedSignal = Box::new(std::iter::repeat(1.0));
        let param: Param = boxed.into();
        match param {
            Param::Fixed(_) => panic!("Expected Signal, got Fixed"),
            Param::Signal(_) => {} // Success
        }
    }

    #[test]
    fn test_fixed_param_never_ends() {
        let mut param = Param::fixed(2.0);
        for _ in 0..1000 {
            assert_eq!(param.value(), Some(2.0));
        }
        assert_eq!(param.size_hint(), (usize::MAX, None));
    }

    #[test]
    fn test_modulated_param_ends_with_its_signal() {
        let mut param = Param::modulated(vec![3.0, 4.0].into_iter());
        assert_eq!(param.size_hint(), (2, Some(2)));
        assert_eq!(param.value(), Some(3.0));
        assert_eq!(param.value(), Some(4.0));
        assert_eq!(param.value(), None);
    }

    #[test]
    fn test_shortest_hint() {
        assert_eq!(shortest((3, Some(3)), (5, Some(5))), (3, Some(3)));
        assert_eq!(shortest((3, Some(3)), (usize::MAX, None)), (3, Some(3)));
        assert_eq!(shortest((0, None), (usize::MAX, None)), (0, None));
    }

    #[test]
    fn test_boxed_signal_is_signal() {
        fn total(signal: impl Signal) -> f64 {
            signal.sum()
        }
        let boxed: BoxedSignal = Box::new(vec![1.0, 2.0].into_iter());
        assert_eq!(total(boxed), 3.0);
    }
}
