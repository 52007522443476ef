use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be stored in a [`DynMatrix`](crate::DynMatrix).
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point elements (`f32`, `f64`).
///
/// Required by the decompositions, the distributions, and the
/// dimension estimator.
pub trait FloatScalar: Scalar + Float {}

impl<T: Scalar + Float> FloatScalar for T {}

/// Read-only element access to a matrix-like type.
///
/// The SVD kernels in [`crate::linalg`] are written against this trait
/// so they can run on any storage.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable element access, for in-place algorithms.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Overwrite with the identity (ones on the main diagonal).
    fn set_identity(&mut self)
    where
        T: Scalar,
    {
        for j in 0..self.ncols() {
            for i in 0..self.nrows() {
                *self.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
            }
        }
    }
}
