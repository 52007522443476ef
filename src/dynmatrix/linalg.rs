use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{bidiagonal_qr, bidiagonalize, LinalgError};
use crate::traits::FloatScalar;

use super::DynMatrix;

/// QR sweep budget for a bidiagonal of a `rows × cols` matrix.
#[inline]
fn max_sweeps(rows: usize, cols: usize) -> usize {
    30 * rows.max(cols)
}

/// Tall working copy of `a` and whether it had to be transposed.
fn tall_copy<T: FloatScalar>(a: &DynMatrix<T>) -> (DynMatrix<T>, bool) {
    if a.nrows() < a.ncols() {
        (a.transpose(), true)
    } else {
        (a.clone(), false)
    }
}

// ── DynSvd ─────────────────────────────────────────────────────────

/// Thin singular value decomposition of a dynamically-sized matrix.
///
/// Holds U (M×K), singular values σ (length K = min(M,N), sorted
/// descending), and Vᵀ (K×N) such that `A = U · diag(σ) · Vᵀ`. Wide matrices
/// are decomposed through their transpose.
///
/// # Example
///
/// ```
/// use spectradim::DynMatrix;
///
/// let a = DynMatrix::from_rows(3, 2, &[
///     1.0_f64, 0.0,
///     0.0, 2.0,
///     0.0, 0.0,
/// ]);
/// let svd = a.svd().unwrap();
/// assert_eq!((svd.u().nrows(), svd.u().ncols()), (3, 2));
/// assert_eq!((svd.vt().nrows(), svd.vt().ncols()), (2, 2));
/// assert!((svd.singular_values()[0] - 2.0).abs() < 1e-12);
/// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DynSvd<T> {
    u: DynMatrix<T>,
    singular_values: Vec<T>,
    vt: DynMatrix<T>,
}

impl<T: FloatScalar> DynSvd<T> {
    /// Compute the thin SVD of any M×N matrix.
    ///
    /// Returns `Err(ConvergenceFailure)` if the bidiagonal QR runs out of
    /// sweeps.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let (m, n) = (a.nrows(), a.ncols());
        let k = m.min(n);
        if k == 0 {
            return Ok(Self {
                u: DynMatrix::zeros(m, 0),
                singular_values: Vec::new(),
                vt: DynMatrix::zeros(0, n),
            });
        }

        let (mut work, transposed) = tall_copy(a);
        let (rows, cols) = (work.nrows(), work.ncols());
        let mut left = DynMatrix::<T>::zeros(rows, rows);
        let mut right = DynMatrix::<T>::zeros(cols, cols);
        let mut diag = vec![T::zero(); cols];
        let mut off_diag = vec![T::zero(); cols];

        bidiagonalize(&mut work, &mut diag, &mut off_diag, Some(&mut left), Some(&mut right));
        bidiagonal_qr(
            &mut diag,
            &mut off_diag[..cols - 1],
            Some(&mut left),
            Some(&mut right),
            max_sweeps(rows, cols),
        )?;

        // work = left · Σ · rightᵀ; for a wide input A = right · Σ · leftᵀ.
        let (u, vt) = if transposed {
            (
                DynMatrix::from_fn(m, k, |i, j| right[(i, j)]),
                DynMatrix::from_fn(k, n, |i, j| left[(j, i)]),
            )
        } else {
            (
                DynMatrix::from_fn(m, k, |i, j| left[(i, j)]),
                DynMatrix::from_fn(k, n, |i, j| right[(j, i)]),
            )
        };

        Ok(Self {
            u,
            singular_values: diag,
            vt,
        })
    }

    /// Compute only the singular values, sorted descending.
    ///
    /// No orthogonal factors are accumulated.
    pub fn singular_values_only(a: &DynMatrix<T>) -> Result<Vec<T>, LinalgError> {
        if a.is_empty() {
            return Ok(Vec::new());
        }

        let (mut work, _) = tall_copy(a);
        let (rows, cols) = (work.nrows(), work.ncols());
        let mut diag = vec![T::zero(); cols];
        let mut off_diag = vec![T::zero(); cols];

        bidiagonalize(&mut work, &mut diag, &mut off_diag, no_vectors(), no_vectors());
        bidiagonal_qr(
            &mut diag,
            &mut off_diag[..cols - 1],
            no_vectors(),
            no_vectors(),
            max_sweeps(rows, cols),
        )?;

        Ok(diag)
    }

    /// The singular values, sorted descending.
    #[inline]
    pub fn singular_values(&self) -> &[T] {
        &self.singular_values
    }

    /// Left singular vectors (M×K). Columns are the vectors.
    #[inline]
    pub fn u(&self) -> &DynMatrix<T> {
        &self.u
    }

    /// Right singular vectors transposed (K×N). Rows are the vectors.
    #[inline]
    pub fn vt(&self) -> &DynMatrix<T> {
        &self.vt
    }

    /// Keep the leading `k` triplets: U[:, :k], σ[:k], Vᵀ[:k, :].
    ///
    /// `k` larger than the rank count keeps everything.
    pub fn truncate(mut self, k: usize) -> Self {
        let k = k.min(self.singular_values.len());
        self.singular_values.truncate(k);
        let u = DynMatrix::from_fn(self.u.nrows(), k, |i, j| self.u[(i, j)]);
        let vt = DynMatrix::from_fn(k, self.vt.ncols(), |i, j| self.vt[(i, j)]);
        Self {
            u,
            singular_values: self.singular_values,
            vt,
        }
    }

    /// `U · diag(σ) · Vᵀ`: the input matrix, or its best rank-k
    /// approximation after [`truncate`](Self::truncate).
    ///
    /// ```
    /// use spectradim::DynMatrix;
    ///
    /// let a = DynMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let back = a.svd().unwrap().reconstruct();
    /// assert!((back[(1, 2)] - 6.0).abs() < 1e-10);
    /// ```
    pub fn reconstruct(&self) -> DynMatrix<T> {
        let k = self.singular_values.len();
        DynMatrix::from_fn(self.u.nrows(), self.vt.ncols(), |i, j| {
            (0..k).fold(T::zero(), |acc, l| {
                acc + self.u[(i, l)] * self.singular_values[l] * self.vt[(l, j)]
            })
        })
    }
}

#[inline]
fn no_vectors<'a, T>() -> Option<&'a mut DynMatrix<T>> {
    None
}

// ── Convenience methods on DynMatrix ────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Thin singular value decomposition.
    pub fn svd(&self) -> Result<DynSvd<T>, LinalgError> {
        DynSvd::new(self)
    }

    /// Singular values only (no U/V computation), sorted descending.
    ///
    /// ```
    /// use spectradim::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
    /// let sv = a.singular_values_only().unwrap();
    /// assert!((sv[0] - 4.0).abs() < 1e-12);
    /// assert!((sv[1] - 3.0).abs() < 1e-12);
    /// ```
    pub fn singular_values_only(&self) -> Result<Vec<T>, LinalgError> {
        DynSvd::singular_values_only(self)
    }
}
