//! # spectradim
//!
//! Profile-likelihood estimate of the embedding dimension of a matrix,
//! no-std compatible. The singular value spectrum is split into a leading
//! "signal" block and a trailing "noise" block, each modelled as Gaussian
//! with a pooled variance; the split with the highest likelihood is the
//! dimension.
//!
//! ## Quick start
//!
//! ```
//! use spectradim::{estimate, search, DimensionSettings, DynMatrix, Parallelism};
//!
//! // From a spectrum you already have
//! let sv = [10.0_f64, 9.9, 0.1, 0.05, 0.02];
//! assert_eq!(search(&sv, None, Parallelism::Sequential), 2);
//!
//! // From a matrix
//! let a = DynMatrix::<f64>::eye(10);
//! assert_eq!(estimate(&a, None, &DimensionSettings::default()).unwrap(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`dimension`] — spectrum extraction, per-split likelihood, the split
//!   search and its sequential / thread-pool executors. Everything is
//!   re-exported at the crate root. Requires `alloc`.
//!
//! - [`dynmatrix`] — Heap-allocated `DynMatrix<T>` with runtime dimensions,
//!   column-major `Vec<T>` storage, and the `DynSvd` wrapper. Requires `alloc`.
//!
//! - [`linalg`] — Householder bidiagonalization and Golub-Kahan SVD as free
//!   functions over `&mut impl MatrixMut<T>`, usable without a heap.
//!
//! - [`stats`] — The normal distribution and sample moments behind the
//!   likelihood.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`), used by everything numeric
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for algorithms
//!
//! ## Logging
//!
//! Diagnostics go through [`tracing`] at `debug` and `trace` level. Nothing
//! is printed unless the application installs a subscriber.
//!
//! ## Cargo features
//!
//! | Feature    | Default  | Description |
//! |------------|----------|-------------|
//! | `std`      | yes      | Implies `alloc`. Hardware FPU via system libm, `std::error::Error` impls |
//! | `alloc`    | via std  | `DynMatrix`, `DynSvd` and the `dimension` module |
//! | `parallel` | yes      | Implies `std`. Thread-pool split search via `rayon` |
//! | `all`      | no       | All features |

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod dimension;
#[cfg(feature = "alloc")]
pub mod dynmatrix;
pub mod linalg;
pub mod stats;
pub mod traits;

#[cfg(feature = "alloc")]
pub use dimension::{
    best_split, estimate, estimate_rows, evaluate, extract, extract_with_vectors, profile, search,
    search_with, DimensionSettings, EstimateError, InputError, ParallelMap, Parallelism,
    RankPolicy, Sequential, Spectrum, SplitScore,
};
#[cfg(feature = "parallel")]
pub use dimension::ThreadPool;
#[cfg(feature = "alloc")]
pub use dynmatrix::{DynMatrix, DynSvd, RaggedRows};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
