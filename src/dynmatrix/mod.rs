mod linalg;

pub use linalg::DynSvd;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};

/// Error for nested-row input whose rows do not all share one length.
///
/// Returned by [`DynMatrix::from_nested_rows`].
///
/// # Example
///
/// ```
/// use spectradim::DynMatrix;
/// use spectradim::dynmatrix::RaggedRows;
///
/// let rows = vec![vec![1.0_f64, 2.0], vec![3.0]];
/// let err = DynMatrix::from_nested_rows(&rows).unwrap_err();
/// assert_eq!(err, RaggedRows { row: 1, expected: 2, got: 1 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaggedRows {
    /// Index of the first row whose length differs from row 0.
    pub row: usize,
    /// Length of row 0.
    pub expected: usize,
    /// Length of the offending row.
    pub got: usize,
}

impl core::fmt::Display for RaggedRows {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ragged rows: row {} has {} columns, expected {}",
            self.row, self.got, self.expected
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RaggedRows {}

/// Dynamically-sized heap-allocated matrix.
///
/// Column-major `Vec<T>` storage with dimensions set at runtime. Implements
/// [`MatrixRef`] and [`MatrixMut`], so the SVD kernels work on it directly.
///
/// # Examples
///
/// ```
/// use spectradim::DynMatrix;
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
///
/// let id = DynMatrix::<f64>::eye(3);
/// assert_eq!(id[(2, 2)], 1.0);
/// assert_eq!(id[(0, 2)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// An `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// An `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        m.set_identity();
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use spectradim::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }

    /// Create a matrix from a list of rows, the shape an adjacency matrix
    /// usually arrives in.
    ///
    /// Every row must have the length of the first one. An empty list
    /// gives a 0×0 matrix.
    ///
    /// ```
    /// use spectradim::DynMatrix;
    /// let rows = vec![vec![0.0_f64, 1.0, 1.0], vec![1.0, 0.0, 0.0]];
    /// let m = DynMatrix::from_nested_rows(&rows).unwrap();
    /// assert_eq!((m.nrows(), m.ncols()), (2, 3));
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn from_nested_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, RaggedRows> {
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != ncols)
        {
            return Err(RaggedRows {
                row,
                expected: ncols,
                got: r.as_ref().len(),
            });
        }
        Ok(Self::from_fn(rows.len(), ncols, |i, j| rows[i].as_ref()[j]))
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }
}

impl<T> DynMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// True if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0 || self.ncols == 0
    }

    /// Column-major view of the elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }
}

impl<T: FloatScalar> DynMatrix<T> {
    /// `(row, col)` of the first NaN or infinite element, scanning
    /// row by row.
    ///
    /// ```
    /// use spectradim::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, f64::NAN, 4.0]);
    /// assert_eq!(m.first_non_finite(), Some((1, 0)));
    /// ```
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        (0..self.nrows)
            .flat_map(|i| (0..self.ncols).map(move |j| (i, j)))
            .find(|&(i, j)| !self[(i, j)].is_finite())
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for DynMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> MatrixMut<T> for DynMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}
