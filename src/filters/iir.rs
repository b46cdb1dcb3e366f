//! General infinite impulse response filter of any order.

use std::collections::VecDeque;

use crate::Signal;

/// IIR filter coefficients.
///
/// `a` holds the feedback (denominator) terms and `b` the feedforward
/// (numerator) terms of
///
/// ```text
/// y[n] = (1 / a[0]) * (Σ b[i]·x[n-i] - Σ_{j>0} a[j]·y[n-j])
/// ```
///
/// The coefficients are immutable; every call to [`Iir::apply`] starts a new
/// traversal with zeroed history, so applying the same filter twice to equal
/// inputs yields equal outputs.
///
/// # Examples
///
/// ```
/// use lazytone::filters::Iir;
///
/// // A two-tap moving sum.
/// let iir = Iir::new(vec![1.0], vec![1.0, 1.0]);
/// let out: Vec<f64> = iir.apply(vec![1.0, 2.0, 3.0].into_iter()).collect();
/// assert_eq!(out, vec![1.0, 3.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Iir {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl Iir {
    /// Creates a filter from feedback `a` and feedforward `b` coefficients.
    ///
    /// # Panics
    ///
    /// Panics if `a` is empty; `a[0]` scales every output.
    pub fn new(a: impl Into<Vec<f64>>, b: impl Into<Vec<f64>>) -> Self {
        let a = a.into();
        assert!(!a.is_empty(), "IIR filter needs at least one feedback coefficient");
        Self { a, b: b.into() }
    }

    /// Feedback (denominator) coefficients.
    pub fn feedback(&self) -> &[f64] {
        &self.a
    }

    /// Feedforward (numerator) coefficients.
    pub fn feedforward(&self) -> &[f64] {
        &self.b
    }

    /// Filters `source`, producing one output per input.
    pub fn apply<S: Signal>(&self, source: S) -> IirFilter<S> {
        IirFilter {
            source,
            a: self.a.clone(),
            b: self.b.clone(),
            inputs: VecDeque::with_capacity(self.b.len()),
            outputs: VecDeque::with_capacity(self.a.len() - 1),
        }
    }
}

/// A running application of an [`Iir`] to one input sequence.
///
/// Keeps the last `b.len()` inputs and `a.len() - 1` outputs, most recent
/// first.
#[derive(Debug, Clone)]
pub struct IirFilter<S> {
    source: S,
    a: Vec<f64>,
    b: Vec<f64>,
    inputs: VecDeque<f64>,
    outputs: VecDeque<f64>,
}

impl<S: Signal> Iterator for IirFilter<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let x = self.source.next()?;
        self.inputs.push_front(x);
        self.inputs.truncate(self.b.len());

        let forward: f64 = self.b.iter().zip(&self.inputs).map(|(b, x)| b * x).sum();
        let feedback: f64 = self.a[1..]
            .iter()
            .zip(&self.outputs)
            .map(|(a, y)| a * y)
            .sum();
        let y = (forward - feedback) / self.a[0];

        self.outputs.push_front(y);
        self.outputs.truncate(self.a.len() - 1);
        Some(y)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}
