use tracing::trace;

use crate::stats::{mean, sample_variance, Normal};
use crate::FloatScalar;

/// Profile log-likelihood of one candidate split.
///
/// `log_likelihood` is `-∞` when the split admits no valid model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitScore<T> {
    /// Number of leading ("signal") singular values.
    pub q: usize,
    /// Log-likelihood of the two-segment model at this split.
    pub log_likelihood: T,
}

impl<T: FloatScalar> SplitScore<T> {
    /// The `-∞` score of a split with no valid model.
    pub fn unsplittable(q: usize) -> Self {
        Self {
            q,
            log_likelihood: T::neg_infinity(),
        }
    }

    /// Whether this split produced a usable model.
    pub fn is_finite(&self) -> bool {
        self.log_likelihood.is_finite()
    }

    /// Strictly higher log-likelihood wins; equal scores go to the lower `q`.
    ///
    /// Selecting with this relation gives the same winner in any visiting
    /// order, and matches a first-seen scan over increasing `q`.
    ///
    /// ```
    /// use spectradim::SplitScore;
    ///
    /// let a = SplitScore { q: 2, log_likelihood: -3.0_f64 };
    /// let b = SplitScore { q: 4, log_likelihood: -3.0_f64 };
    /// assert!(a.beats(&b));
    /// assert!(!b.beats(&a));
    /// ```
    pub fn beats(&self, other: &Self) -> bool {
        self.log_likelihood > other.log_likelihood
            || (self.log_likelihood == other.log_likelihood && self.q < other.q)
    }
}

/// Log-likelihood of splitting `sv[..p]` after its first `q` values.
///
/// The prefix `sv[..q]` and the suffix `sv[q..p]` are each modelled as
/// Gaussian with their own mean and a common variance pooled from both
/// segments' Bessel-corrected sample variances:
///
/// ```text
/// σ² = ((q − 1)·s₁² + (p − q − 1)·s₂²) / (p − 2)
/// ```
///
/// An empty suffix, `p ≤ 2`, or a pooled variance that is not a finite
/// positive number all give `-∞`. This function never fails.
///
/// # Example
///
/// ```
/// use spectradim::evaluate;
///
/// let sv = [10.0_f64, 9.9, 0.1, 0.05, 0.02];
/// let at_two = evaluate(&sv, sv.len(), 2);
/// let at_one = evaluate(&sv, sv.len(), 1);
/// assert!(at_two.log_likelihood > at_one.log_likelihood);
///
/// let flat = [5.0_f64; 4];
/// assert_eq!(evaluate(&flat, 4, 2).log_likelihood, f64::NEG_INFINITY);
/// ```
pub fn evaluate<T: FloatScalar>(sv: &[T], p: usize, q: usize) -> SplitScore<T> {
    let end = p.min(sv.len());
    let split = q.min(end);
    let (signal, noise) = (&sv[..split], &sv[split..end]);

    if noise.is_empty() || p <= 2 {
        return SplitScore::unsplittable(q);
    }

    let one = T::one();
    let (qf, pf) = (count::<T>(q), count::<T>(p));
    let pooled = ((qf - one) * sample_variance(signal) + (pf - qf - one) * sample_variance(noise))
        / (pf - one - one);
    if !pooled.is_finite() || pooled <= T::zero() {
        trace!(q, p, pooled = ?pooled, "no valid pooled variance");
        return SplitScore::unsplittable(q);
    }

    let sigma = pooled.sqrt();
    match (Normal::new(mean(signal), sigma), Normal::new(mean(noise), sigma)) {
        (Ok(upper), Ok(lower)) => SplitScore {
            q,
            log_likelihood: upper.ln_likelihood(signal) + lower.ln_likelihood(noise),
        },
        _ => SplitScore::unsplittable(q),
    }
}

#[inline]
fn count<T: FloatScalar>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}
