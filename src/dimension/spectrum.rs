use alloc::vec::Vec;
use core::ops::Deref;

use tracing::debug;

use super::{EstimateError, InputError};
use crate::{DynMatrix, DynSvd, FloatScalar};

/// Singular values of a matrix, largest first.
///
/// Produced by [`extract`]; dereferences to `[T]`.
///
/// ```
/// use spectradim::{extract, DynMatrix};
///
/// let a = DynMatrix::from_rows(2, 2, &[0.0_f64, 3.0, 4.0, 0.0]);
/// let s = extract(&a, None).unwrap();
/// assert_eq!(s.len(), 2);
/// assert!((s[0] - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum<T> {
    values: Vec<T>,
}

impl<T> Spectrum<T> {
    /// The singular values as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Take ownership of the values.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T> Deref for Spectrum<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<T> AsRef<[T]> for Spectrum<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.values
    }
}

/// Number of leading values kept from a spectrum of `full` values when `k`
/// is requested. Missing, zero, or oversized `k` keeps everything.
#[inline]
pub(crate) fn leading_count(full: usize, k: Option<usize>) -> usize {
    match k {
        Some(k) if k > 0 => k.min(full),
        _ => full,
    }
}

/// Reject matrices the decomposition cannot take.
pub(crate) fn validate<T: FloatScalar>(a: &DynMatrix<T>) -> Result<(), InputError> {
    if a.is_empty() {
        return Err(InputError::Empty {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if let Some((row, col)) = a.first_non_finite() {
        return Err(InputError::NotFinite { row, col });
    }
    Ok(())
}

/// Singular values of `a` in descending order, keeping the top `k`.
///
/// `k` of `None`, zero, or above `min(rows, cols)` keeps all of them.
///
/// # Errors
///
/// [`EstimateError::InvalidInput`] for an empty matrix or one with a NaN or
/// infinite entry; [`EstimateError::Decomposition`] if the SVD does not
/// converge.
///
/// ```
/// use spectradim::{extract, DynMatrix};
///
/// let a = DynMatrix::from_fn(4, 3, |i, j| (i * 3 + j) as f64 + if i == j { 5.0 } else { 0.0 });
/// let all = extract(&a, None).unwrap();
/// let top = extract(&a, Some(2)).unwrap();
/// assert_eq!(all.len(), 3);
/// assert_eq!(&all[..2], &top[..]);
/// ```
pub fn extract<T: FloatScalar>(a: &DynMatrix<T>, k: Option<usize>) -> Result<Spectrum<T>, EstimateError> {
    validate(a)?;
    let mut values = a.singular_values_only()?;
    values.truncate(leading_count(values.len(), k));
    debug!(rows = a.nrows(), cols = a.ncols(), kept = values.len(), "extracted spectrum");
    Ok(Spectrum { values })
}

/// The top `k` singular triplets of `a`: U[:, :k], σ[:k], Vᵀ[:k, :].
///
/// Same `k` handling and errors as [`extract`]. Use
/// [`DynSvd::reconstruct`] for the rank-k approximation.
///
/// ```
/// use spectradim::{extract_with_vectors, DynMatrix};
///
/// let a = DynMatrix::from_rows(3, 3, &[2.0_f64, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.5]);
/// let svd = extract_with_vectors(&a, Some(1)).unwrap();
/// let approx = svd.reconstruct();
/// assert!((approx[(0, 0)] - 2.0).abs() < 1e-12);
/// assert!(approx[(1, 1)].abs() < 1e-12);
/// ```
pub fn extract_with_vectors<T: FloatScalar>(
    a: &DynMatrix<T>,
    k: Option<usize>,
) -> Result<DynSvd<T>, EstimateError> {
    validate(a)?;
    let svd = a.svd()?;
    let kept = leading_count(svd.singular_values().len(), k);
    debug!(rows = a.nrows(), cols = a.ncols(), kept, "extracted singular triplets");
    Ok(svd.truncate(kept))
}
