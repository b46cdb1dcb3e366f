//! Element-wise reduction across several sequences.

/// Folds the i-th elements of every input into one value per index.
///
/// Stops as soon as any input is exhausted, so the output is as long as the
/// shortest input.
#[derive(Debug, Clone)]
pub struct VectorReduce<I, T, F> {
    sources: Vec<I>,
    seed: T,
    func: F,
}

impl<I, T, F> Iterator for VectorReduce<I, T, F>
where
    I: Iterator,
    T: Clone,
    F: FnMut(T, I::Item) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.sources.is_empty() {
            return None;
        }
        let mut acc = self.seed.clone();
        for source in &mut self.sources {
            acc = (self.func)(acc, source.next()?);
        }
        Some(acc)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        lockstep_hint(&self.sources)
    }
}

/// Like [`VectorReduce`] but seeded with the first input's element.
#[derive(Debug, Clone)]
pub struct VectorReduce1<I, F> {
    sources: Vec<I>,
    func: F,
}

impl<I, F> Iterator for VectorReduce1<I, F>
where
    I: Iterator,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let (first, rest) = self.sources.split_first_mut()?;
        let mut acc = first.next()?;
        for source in rest {
            acc = (self.func)(acc, source.next()?);
        }
        Some(acc)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        lockstep_hint(&self.sources)
    }
}

/// Size hint of sequences consumed in lockstep: the shortest one wins.
pub(crate) fn lockstep_hint<I: Iterator>(sources: &[I]) -> (usize, Option<usize>) {
    if sources.is_empty() {
        return (0, Some(0));
    }
    sources
        .iter()
        .map(Iterator::size_hint)
        .fold((usize::MAX, None), crate::signals::shortest)
}

/// Reduces the i-th elements of all `sources` with `func`, starting from `seed`.
///
/// # Examples
///
/// ```
/// use lazytone::combinators::vector_reduce;
///
/// let sources = vec![vec![1, 2, 3].into_iter(), vec![4, 5, 6].into_iter(), vec![7, 8, 9].into_iter()];
/// let sums: Vec<i32> = vector_reduce(sources, 0, |a, b| a + b).collect();
/// assert_eq!(sums, vec![12, 15, 18]);
/// ```
pub fn vector_reduce<I, T, F>(
    sources: impl IntoIterator<Item = I>,
    seed: T,
    func: F,
) -> VectorReduce<I, T, F>
where
    I: Iterator,
    T: Clone,
    F: FnMut(T, I::Item) -> T,
{
    VectorReduce {
        sources: sources.into_iter().collect(),
        seed,
        func,
    }
}

/// Reduces the i-th elements of all `sources` with `func`, seeded by the first.
pub fn vector_reduce1<I, F>(sources: impl IntoIterator<Item = I>, func: F) -> VectorReduce1<I, F>
where
    I: Iterator,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    VectorReduce1 {
        sources: sources.into_iter().collect(),
        func,
    }
}

/// Element-wise sum of signals (mixing without attenuation).
pub type Sum<I> = VectorReduce1<I, fn(f64, f64) -> f64>;

/// Adds signals sample by sample, ending with the shortest.
///
/// # Examples
///
/// ```
/// use lazytone::combinators::sum;
///
/// let mixed: Vec<f64> = sum(vec![vec![1.0, 2.0].into_iter(), vec![0.5, 0.5, 9.0].into_iter()])
///     .collect();
/// assert_eq!(mixed, vec![1.5, 2.5]);
/// ```
pub fn sum<I>(sources: impl IntoIterator<Item = I>) -> Sum<I>
where
    I: Iterator<Item = f64>,
{
    vector_reduce1(sources, add as fn(f64, f64) -> f64)
}

fn add(a: f64, b: f64) -> f64 {
    a + b
}
