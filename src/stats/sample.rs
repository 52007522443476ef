use crate::FloatScalar;

/// Arithmetic mean of a sample. An empty sample has mean zero.
pub fn mean<T: FloatScalar>(xs: &[T]) -> T {
    if xs.is_empty() {
        return T::zero();
    }
    let n = T::from(xs.len()).unwrap_or_else(T::nan);
    xs.iter().fold(T::zero(), |acc, &x| acc + x) / n
}

/// Bessel-corrected sample variance, `Σ(x − x̄)² / (n − 1)`.
///
/// Samples with fewer than two elements have variance zero.
///
/// ```
/// use spectradim::stats::sample_variance;
/// assert_eq!(sample_variance(&[4.0_f64]), 0.0);
/// assert_eq!(sample_variance(&[1.0_f64, 3.0]), 2.0);
/// ```
pub fn sample_variance<T: FloatScalar>(xs: &[T]) -> T {
    if xs.len() < 2 {
        return T::zero();
    }
    let mu = mean(xs);
    let ss = xs.iter().fold(T::zero(), |acc, &x| acc + (x - mu) * (x - mu));
    let dof = T::from(xs.len() - 1).unwrap_or_else(T::nan);
    ss / dof
}
