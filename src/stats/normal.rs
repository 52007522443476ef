use super::{ContinuousDistribution, StatsError};
use crate::FloatScalar;

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Example
///
/// ```
/// use spectradim::stats::{Normal, ContinuousDistribution};
///
/// let n = Normal::new(2.0_f64, 0.5).unwrap();
/// assert!((n.pdf(2.0) - 0.7978845608028654).abs() < 1e-14);
/// assert!((n.variance() - 0.25).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Normal<T> {
    mu: T,
    sigma: T,
}

impl<T: FloatScalar> Normal<T> {
    /// Create a normal distribution with mean `mu` and standard deviation `sigma`.
    ///
    /// Requires a finite `mu` and a finite `sigma > 0`.
    pub fn new(mu: T, sigma: T) -> Result<Self, StatsError> {
        if !mu.is_finite() || !sigma.is_finite() || sigma <= T::zero() {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { mu, sigma })
    }

    /// Standard deviation σ.
    #[inline]
    pub fn std_dev(&self) -> T {
        self.sigma
    }

    /// Sum of `ln_pdf` over a sample.
    ///
    /// ```
    /// use spectradim::stats::{Normal, ContinuousDistribution};
    ///
    /// let n = Normal::new(0.0_f64, 1.0).unwrap();
    /// let xs = [-1.0, 0.0, 1.0];
    /// let total: f64 = xs.iter().map(|&x| n.ln_pdf(x)).sum();
    /// assert!((n.ln_likelihood(&xs) - total).abs() < 1e-14);
    /// ```
    pub fn ln_likelihood(&self, xs: &[T]) -> T {
        xs.iter().fold(T::zero(), |acc, &x| acc + self.ln_pdf(x))
    }

    /// ln(σ√(2π)), the normalizing term shared by every `ln_pdf` call.
    #[inline]
    fn ln_norm(&self) -> T {
        let two = T::one() + T::one();
        let pi = T::from(core::f64::consts::PI).unwrap_or_else(T::zero);
        self.sigma.ln() + (two * pi).ln() / two
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Normal<T> {
    fn pdf(&self, x: T) -> T {
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: T) -> T {
        let two = T::one() + T::one();
        let z = (x - self.mu) / self.sigma;
        -self.ln_norm() - z * z / two
    }

    fn mean(&self) -> T {
        self.mu
    }

    fn variance(&self) -> T {
        self.sigma * self.sigma
    }
}
