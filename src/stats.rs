//! Small numeric summaries used when reporting sampling runs.

use num_traits::Float;

/// Arithmetic mean of a slice. An empty slice yields NaN.
pub fn mean<T: Float>(xs: &[T]) -> T {
    xs.iter().fold(T::zero(), |acc, &x| acc + x) / T::from(xs.len()).unwrap()
}

/// Population variance of a slice around [`mean`]. An empty slice yields NaN.
pub fn variance<T: Float>(xs: &[T]) -> T {
    let m = mean(xs);
    xs.iter()
        .map(|&x| (x - m) * (x - m))
        .fold(T::zero(), |acc, x| acc + x)
        / T::from(xs.len()).unwrap()
}

/// The last `k` elements of a slice, or the whole slice when it is shorter.
pub fn tail<T>(xs: &[T], k: usize) -> &[T] {
    &xs[xs.len().saturating_sub(k)..]
}
