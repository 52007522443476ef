use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How candidate splits are evaluated.
///
/// # Example
///
/// ```
/// use spectradim::Parallelism;
///
/// assert_eq!(Parallelism::from_jobs(1), Parallelism::Sequential);
/// assert_eq!(Parallelism::from_jobs(-1), Parallelism::Available);
/// assert_eq!(Parallelism::from_jobs(4), Parallelism::Threads(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// One thread, increasing `q`.
    Sequential,
    /// A pool of this many worker threads. `Threads(0)` behaves like
    /// [`Available`](Self::Available).
    Threads(usize),
    /// A pool with one worker per available processing unit.
    #[default]
    Available,
}

impl Parallelism {
    /// Map a signed job count: `1` is sequential, `n ≤ 0` uses every
    /// available processing unit, anything else is a pool of `n` threads.
    pub fn from_jobs(n_jobs: i64) -> Self {
        match n_jobs {
            1 => Self::Sequential,
            n if n <= 0 => Self::Available,
            n => usize::try_from(n).map_or(Self::Available, Self::Threads),
        }
    }

    /// Pool size to request, or `None` for the sequential path.
    ///
    /// `Some(0)` leaves the choice to the pool.
    pub fn threads(self) -> Option<usize> {
        match self {
            Self::Sequential | Self::Threads(1) => None,
            Self::Threads(n) => Some(n),
            Self::Available => Some(0),
        }
    }
}

/// A worker pool that can apply a pure function to independent inputs.
///
/// Implementations may evaluate in any order and on any thread; the
/// returned results correspond to `inputs` element by element.
pub trait ParallelMap {
    fn map<I, R, F>(&self, inputs: &[I], f: F) -> Vec<R>
    where
        I: Sync,
        R: Send,
        F: Fn(&I) -> R + Sync + Send;
}

/// Runs every input on the calling thread, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl ParallelMap for Sequential {
    fn map<I, R, F>(&self, inputs: &[I], f: F) -> Vec<R>
    where
        I: Sync,
        R: Send,
        F: Fn(&I) -> R + Sync + Send,
    {
        inputs.iter().map(f).collect()
    }
}

/// A dedicated rayon thread pool.
///
/// ```
/// use spectradim::{ParallelMap, ThreadPool};
///
/// let pool = ThreadPool::new(2).unwrap();
/// let squares = pool.map(&[1, 2, 3], |&x| x * x);
/// assert_eq!(squares, vec![1, 4, 9]);
/// ```
#[cfg(feature = "parallel")]
#[derive(Debug)]
pub struct ThreadPool {
    pool: rayon::ThreadPool,
}

#[cfg(feature = "parallel")]
impl ThreadPool {
    /// Build a pool of `threads` workers; `0` means one per processing unit.
    pub fn new(threads: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("spectradim-{}", i))
            .build()?;
        Ok(Self { pool })
    }

    /// Number of worker threads in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

#[cfg(feature = "parallel")]
impl ParallelMap for ThreadPool {
    fn map<I, R, F>(&self, inputs: &[I], f: F) -> Vec<R>
    where
        I: Sync,
        R: Send,
        F: Fn(&I) -> R + Sync + Send,
    {
        self.pool.install(|| inputs.par_iter().map(|x| f(x)).collect())
    }
}
