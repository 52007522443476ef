//! Dense real linear algebra: the singular value decomposition.
//!
//! The kernels are free functions over [`MatrixMut`] so they run in place on
//! any storage; [`DynSvd`](crate::DynSvd) wraps them for heap matrices.
//!
//! - [`bidiagonalize`] reduces a tall matrix to upper bidiagonal form with
//!   Householder reflections.
//! - [`bidiagonal_qr`] diagonalizes the bidiagonal with Golub-Kahan
//!   implicit-shift QR sweeps and sorts the singular values descending.
//!
//! Singular vectors are accumulated only when an accumulator matrix is
//! passed in, so the values-only path allocates no M×M workspace.

pub(crate) mod svd;

pub use svd::{bidiagonal_qr, bidiagonalize};

use crate::traits::{FloatScalar, MatrixMut};

/// Errors from linear algebra operations.
///
/// ```
/// use spectradim::linalg::LinalgError;
///
/// let e = LinalgError::ConvergenceFailure;
/// assert_eq!(e.to_string(), "iterative algorithm did not converge");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Givens rotation `(c, s)` with `c*a + s*b = r` and `-s*a + c*b = 0`.
pub(crate) fn givens<T: FloatScalar>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        (T::one(), T::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = T::one() / (T::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / (T::one() + t * t).sqrt();
        (c, c * t)
    }
}

/// Apply a plane rotation to columns `a` and `b`:
/// `col_a ← c·col_a + s·col_b`, `col_b ← c·col_b − s·col_a`.
pub(crate) fn rotate_columns<T: FloatScalar>(
    m: &mut impl MatrixMut<T>,
    a: usize,
    b: usize,
    c: T,
    s: T,
) {
    for row in 0..m.nrows() {
        let xa = *m.get(row, a);
        let xb = *m.get(row, b);
        *m.get_mut(row, a) = c * xa + s * xb;
        *m.get_mut(row, b) = c * xb - s * xa;
    }
}

pub(crate) fn swap_columns<T: FloatScalar>(m: &mut impl MatrixMut<T>, a: usize, b: usize) {
    for row in 0..m.nrows() {
        let tmp = *m.get(row, a);
        *m.get_mut(row, a) = *m.get(row, b);
        *m.get_mut(row, b) = tmp;
    }
}

pub(crate) fn negate_column<T: FloatScalar>(m: &mut impl MatrixMut<T>, col: usize) {
    for row in 0..m.nrows() {
        let x = *m.get(row, col);
        *m.get_mut(row, col) = -x;
    }
}
