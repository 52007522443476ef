//! Profile-likelihood estimate of the embedding dimension of a matrix.
//!
//! The singular values of the matrix are split into a leading "signal"
//! block and a trailing "noise" block. Each block is modelled as Gaussian
//! with its own mean and a shared pooled variance, and the split with the
//! highest log-likelihood is the estimated dimension.
//!
//! - [`extract`] / [`extract_with_vectors`] — singular values (and vectors)
//!   of a matrix, truncated to the top `k`
//! - [`evaluate`] — log-likelihood of one split
//! - [`search`] / [`search_with`] — best split over all candidates,
//!   sequentially or on a worker pool
//! - [`profile`] — the whole likelihood curve
//! - [`estimate`] — matrix in, dimension out
//!
//! # Example
//!
//! ```
//! use spectradim::{estimate, DimensionSettings, DynMatrix};
//!
//! // Two communities of four nodes, with a little off-block weight.
//! let a = DynMatrix::from_fn(8, 8, |i, j| {
//!     let block = if i / 4 == j / 4 { 1.0_f64 } else { 0.0 };
//!     block + 0.1 * (((i * 7 + j * 3) % 5) as f64 - 2.0)
//! });
//! let d = estimate(&a, None, &DimensionSettings::default()).unwrap();
//! assert_eq!(d, 2);
//! ```

mod likelihood;
mod parallel;
mod search;
mod spectrum;


pub use likelihood::{evaluate, SplitScore};
#[cfg(feature = "parallel")]
pub use parallel::ThreadPool;
pub use parallel::{ParallelMap, Parallelism, Sequential};
pub use search::{best_split, profile, search, search_with};
pub use spectrum::{extract, extract_with_vectors, Spectrum};

use tracing::debug;

use crate::dynmatrix::{DynMatrix, RaggedRows};
use crate::linalg::LinalgError;
use crate::FloatScalar;

/// Why an input matrix was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The matrix has no rows or no columns.
    Empty { rows: usize, cols: usize },
    /// An entry is NaN or infinite.
    NotFinite { row: usize, col: usize },
    /// Nested rows of unequal length.
    Ragged(RaggedRows),
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InputError::Empty { rows, cols } => write!(f, "matrix is empty ({}x{})", rows, cols),
            InputError::NotFinite { row, col } => {
                write!(f, "matrix entry ({}, {}) is not finite", row, col)
            }
            InputError::Ragged(r) => write!(f, "{}", r),
        }
    }
}

/// Errors from [`estimate`] and the spectrum extractors.
///
/// Short spectra and unsplittable candidates are not errors; they are part
/// of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateError {
    /// The matrix cannot be decomposed.
    InvalidInput(InputError),
    /// The singular value decomposition failed.
    Decomposition(LinalgError),
}

impl core::fmt::Display for EstimateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EstimateError::InvalidInput(e) => write!(f, "invalid input: {}", e),
            EstimateError::Decomposition(e) => write!(f, "decomposition failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EstimateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EstimateError::InvalidInput(InputError::Ragged(r)) => Some(r),
            EstimateError::InvalidInput(_) => None,
            EstimateError::Decomposition(e) => Some(e),
        }
    }
}

impl From<InputError> for EstimateError {
    fn from(e: InputError) -> Self {
        EstimateError::InvalidInput(e)
    }
}

impl From<RaggedRows> for EstimateError {
    fn from(e: RaggedRows) -> Self {
        EstimateError::InvalidInput(InputError::Ragged(e))
    }
}

impl From<LinalgError> for EstimateError {
    fn from(e: LinalgError) -> Self {
        EstimateError::Decomposition(e)
    }
}

/// How many singular values enter the search when the caller does not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankPolicy {
    /// Every singular value, `min(rows, cols)` of them.
    #[default]
    Full,
    /// At most this many of the largest values.
    Fixed(usize),
}

impl RankPolicy {
    /// The `k` to use: a positive `requested` value wins, otherwise the
    /// policy decides. `None` means all values.
    ///
    /// ```
    /// use spectradim::RankPolicy;
    ///
    /// assert_eq!(RankPolicy::Full.resolve(Some(3)), Some(3));
    /// assert_eq!(RankPolicy::Full.resolve(Some(0)), None);
    /// assert_eq!(RankPolicy::Fixed(5).resolve(None), Some(5));
    /// ```
    pub fn resolve(self, requested: Option<usize>) -> Option<usize> {
        match (requested, self) {
            (Some(k), _) if k > 0 => Some(k),
            (_, RankPolicy::Full) => None,
            (_, RankPolicy::Fixed(k)) => Some(k),
        }
    }
}

/// Settings for [`estimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimensionSettings {
    /// How candidate splits are evaluated.
    pub parallelism: Parallelism,
    /// Default truncation of the spectrum.
    pub rank_policy: RankPolicy,
}

impl DimensionSettings {
    /// Replace the parallelism.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Replace the rank policy.
    pub fn with_rank_policy(mut self, rank_policy: RankPolicy) -> Self {
        self.rank_policy = rank_policy;
        self
    }
}

/// Estimated embedding dimension of `a`.
///
/// `k` caps the number of singular values considered; `None` or `Some(0)`
/// defers to `settings.rank_policy`.
///
/// # Errors
///
/// [`EstimateError::InvalidInput`] for an empty or non-finite matrix;
/// [`EstimateError::Decomposition`] if the SVD does not converge.
pub fn estimate<T>(
    a: &DynMatrix<T>,
    k: Option<usize>,
    settings: &DimensionSettings,
) -> Result<usize, EstimateError>
where
    T: FloatScalar + Send + Sync,
{
    let k = settings.rank_policy.resolve(k);
    let spectrum = extract(a, k)?;
    let d = search(&spectrum, None, settings.parallelism);
    debug!(rows = a.nrows(), cols = a.ncols(), ?k, dimension = d, "estimated embedding dimension");
    Ok(d)
}

/// [`estimate`] on a matrix given as a list of rows.
///
/// ```
/// use spectradim::{estimate_rows, DimensionSettings, EstimateError};
///
/// let rows = vec![vec![1.0_f64, 0.0], vec![0.0]];
/// let err = estimate_rows(&rows, None, &DimensionSettings::default()).unwrap_err();
/// assert!(matches!(err, EstimateError::InvalidInput(_)));
/// ```
pub fn estimate_rows<T, R>(
    rows: &[R],
    k: Option<usize>,
    settings: &DimensionSettings,
) -> Result<usize, EstimateError>
where
    T: FloatScalar + Send + Sync,
    R: AsRef<[T]>,
{
    let a = DynMatrix::from_nested_rows(rows)?;
    estimate(&a, k, settings)
}
