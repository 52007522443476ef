//! Distributions and sample statistics used by the profile likelihood.
//!
//! # Example
//!
//! ```
//! use spectradim::stats::{mean, sample_variance, ContinuousDistribution, Normal};
//!
//! let xs = [1.0_f64, 2.0, 3.0, 4.0];
//! assert_eq!(mean(&xs), 2.5);
//! assert!((sample_variance(&xs) - 5.0 / 3.0).abs() < 1e-15);
//!
//! let n = Normal::new(0.0_f64, 1.0).unwrap();
//! assert!((n.ln_pdf(0.0) + 0.5 * (2.0 * core::f64::consts::PI).ln()).abs() < 1e-15);
//! ```

mod normal;
mod sample;


pub use normal::Normal;
pub use sample::{mean, sample_variance};

/// Errors from distribution construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// A parameter is out of its valid range.
    InvalidParameter,
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::InvalidParameter => {
                write!(f, "distribution parameter out of valid range")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}

/// Trait for continuous probability distributions.
pub trait ContinuousDistribution<T> {
    /// Probability density function.
    fn pdf(&self, x: T) -> T;
    /// Natural log of the probability density function.
    fn ln_pdf(&self, x: T) -> T;
    /// Expected value E\[X\].
    fn mean(&self) -> T;
    /// Variance Var(X).
    fn variance(&self) -> T;
}
