use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use tracing::warn;
use tracing::debug;

use super::likelihood::{evaluate, SplitScore};
use super::parallel::{ParallelMap, Parallelism};
use super::spectrum::leading_count;
#[cfg(feature = "parallel")]
use super::parallel::ThreadPool;
use crate::FloatScalar;

/// The winning split among `scores`, by [`SplitScore::beats`].
///
/// With no scores, or only `-∞` ones, the answer is `q = 1`.
pub fn best_split<T: FloatScalar>(scores: impl IntoIterator<Item = SplitScore<T>>) -> SplitScore<T> {
    scores
        .into_iter()
        .fold(SplitScore::unsplittable(1), |best, s| if s.beats(&best) { s } else { best })
}

/// Estimate the embedding dimension from a descending singular-value
/// sequence.
///
/// Only the first `k` values are used (`None` or `0` for all of them).
/// Every split `q` in `1..p` is scored with [`evaluate`] and the best one
/// is returned; ties go to the smallest `q`. Spectra of two values or fewer
/// have no split and give `1`.
///
/// The answer does not depend on `parallelism`.
///
/// # Example
///
/// ```
/// use spectradim::{search, Parallelism};
///
/// let sv = [10.0_f64, 9.9, 0.1, 0.05, 0.02];
/// assert_eq!(search(&sv, None, Parallelism::Sequential), 2);
/// assert_eq!(search(&sv, None, Parallelism::Threads(2)), 2);
/// assert_eq!(search(&[10.0_f64, 9.8], None, Parallelism::Sequential), 1);
/// ```
pub fn search<T>(singular_values: &[T], k: Option<usize>, parallelism: Parallelism) -> usize
where
    T: FloatScalar + Send + Sync,
{
    let sv = &singular_values[..leading_count(singular_values.len(), k)];
    let p = sv.len();
    if p <= 2 {
        debug!(p, "spectrum too short to split");
        return 1;
    }

    let best = match parallelism.threads() {
        #[cfg(feature = "parallel")]
        Some(threads) => match ThreadPool::new(threads) {
            Ok(pool) => best_split(score_all(sv, &pool)),
            Err(err) => {
                warn!(%err, threads, "could not build thread pool, searching sequentially");
                best_split((1..p).map(|q| evaluate(sv, p, q)))
            }
        },
        _ => best_split((1..p).map(|q| evaluate(sv, p, q))),
    };

    debug!(p, dimension = best.q, log_likelihood = ?best.log_likelihood, ?parallelism, "selected split");
    best.q
}

/// [`search`] on a caller-supplied executor.
///
/// ```
/// use spectradim::{search_with, Sequential};
///
/// let sv = [12.0_f64, 11.5, 11.0, 3.0, 2.9, 2.8, 2.7, 0.5, 0.4, 0.3];
/// assert_eq!(search_with(&sv, None, &Sequential), 3);
/// ```
pub fn search_with<T, M>(singular_values: &[T], k: Option<usize>, executor: &M) -> usize
where
    T: FloatScalar + Send + Sync,
    M: ParallelMap,
{
    let sv = &singular_values[..leading_count(singular_values.len(), k)];
    if sv.len() <= 2 {
        return 1;
    }
    best_split(score_all(sv, executor)).q
}

/// Scores of every split `q` in `1..p`, in increasing `q`.
///
/// Empty for spectra of two values or fewer.
///
/// ```
/// use spectradim::profile;
///
/// let curve = profile(&[10.0_f64, 9.9, 0.1, 0.05, 0.02], None);
/// assert_eq!(curve.len(), 4);
/// assert_eq!(curve[1].q, 2);
/// ```
pub fn profile<T: FloatScalar>(singular_values: &[T], k: Option<usize>) -> Vec<SplitScore<T>> {
    let sv = &singular_values[..leading_count(singular_values.len(), k)];
    let p = sv.len();
    if p <= 2 {
        return Vec::new();
    }
    (1..p).map(|q| evaluate(sv, p, q)).collect()
}

fn score_all<T, M>(sv: &[T], executor: &M) -> Vec<SplitScore<T>>
where
    T: FloatScalar + Send + Sync,
    M: ParallelMap,
{
    let p = sv.len();
    let candidates: Vec<usize> = (1..p).collect();
    executor.map(&candidates, |&q| evaluate(sv, p, q))
}
