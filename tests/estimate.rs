use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spectradim::{
    estimate, estimate_rows, extract, extract_with_vectors, profile, search, search_with,
    DimensionSettings, DynMatrix, Parallelism, RankPolicy, Sequential,
};

const TOL: f64 = 1e-9;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() < tol, "{}: {} vs {}", msg, a, b);
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Three planted blocks of five nodes, dense inside, sparse across, with a
/// deterministic ripple so no two singular values tie.
fn three_block_graph() -> DynMatrix<f64> {
    DynMatrix::from_fn(15, 15, |i, j| {
        let p = if i / 5 == j / 5 { 0.9 } else { 0.1 };
        p + 0.05 * ((i * 13 + j * 7) as f64).sin()
    })
}

fn two_block_graph() -> DynMatrix<f64> {
    DynMatrix::from_fn(8, 8, |i, j| {
        let block = if i / 4 == j / 4 { 1.0_f64 } else { 0.0 };
        block + 0.1 * (((i * 7 + j * 3) % 5) as f64 - 2.0)
    })
}

fn random_matrix(rng: &mut StdRng, m: usize, n: usize, scale: f64) -> DynMatrix<f64> {
    let data: Vec<f64> = (0..m * n).map(|_| rng.gen_range(-scale..scale)).collect();
    DynMatrix::from_rows(m, n, &data)
}

/// `signal` values near 10 and `noise` values near 0.5, descending.
fn planted_spectrum(rng: &mut StdRng, signal: usize, noise: usize) -> Vec<f64> {
    let mut sv: Vec<f64> = (0..signal).map(|_| rng.gen_range(9.5..10.5)).collect();
    sv.extend((0..noise).map(|_| rng.gen_range(0.2..0.8)));
    sv.sort_by(|a, b| b.total_cmp(a));
    sv
}

// ── Matrix to dimension ─────────────────────────────────────────────

#[test]
fn three_blocks() {
    init_logging();
    let a = three_block_graph();
    let sequential = DimensionSettings::default().with_parallelism(Parallelism::Sequential);
    assert_eq!(estimate(&a, None, &sequential), Ok(3));
    assert_eq!(estimate(&a, None, &DimensionSettings::default()), Ok(3));
    assert_eq!(
        estimate(&a, None, &sequential.with_parallelism(Parallelism::Threads(4))),
        Ok(3)
    );
}

#[test]
fn two_blocks() {
    init_logging();
    let a = two_block_graph();
    for parallelism in [Parallelism::Sequential, Parallelism::Threads(2), Parallelism::Available] {
        let settings = DimensionSettings::default().with_parallelism(parallelism);
        assert_eq!(estimate(&a, None, &settings), Ok(2), "{:?}", parallelism);
    }
}

#[test]
fn rows_input_matches_matrix_input() {
    let a = three_block_graph();
    let rows: Vec<Vec<f64>> = (0..15).map(|i| (0..15).map(|j| a[(i, j)]).collect()).collect();
    let settings = DimensionSettings::default();
    assert_eq!(estimate_rows(&rows, None, &settings), estimate(&a, None, &settings));
}

#[test]
fn rank_policy_caps_spectrum() {
    let a = three_block_graph();
    let full = extract(&a, None).unwrap();
    let expected = search(&full, Some(6), Parallelism::Sequential);
    let settings = DimensionSettings::default()
        .with_parallelism(Parallelism::Sequential)
        .with_rank_policy(RankPolicy::Fixed(6));
    assert_eq!(estimate(&a, None, &settings), Ok(expected));
    // An explicit k overrides the policy
    assert_eq!(estimate(&a, Some(15), &settings), Ok(3));
}

// ── Executor independence ───────────────────────────────────────────

#[test]
fn planted_spectra_sequential_equals_parallel() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for trial in 0..40 {
        let signal = rng.gen_range(2..7);
        let noise = rng.gen_range(6..16);
        let sv = planted_spectrum(&mut rng, signal, noise);

        let seq = search(&sv, None, Parallelism::Sequential);
        assert_eq!(seq, signal, "trial {}: {:?}", trial, sv);
        assert_eq!(search(&sv, None, Parallelism::Threads(3)), seq, "trial {}", trial);
        assert_eq!(search(&sv, None, Parallelism::Available), seq, "trial {}", trial);
        assert_eq!(search_with(&sv, None, &Sequential), seq, "trial {}", trial);
    }
}

#[test]
fn shared_pool_matches_sequential() {
    let pool = spectradim::ThreadPool::new(4).unwrap();
    assert_eq!(pool.num_threads(), 4);
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..20 {
        let n = rng.gen_range(3..60);
        let mut sv: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..5.0)).collect();
        sv.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(search_with(&sv, None, &pool), search(&sv, None, Parallelism::Sequential));
    }
}

#[test]
fn profile_peak_is_search_result() {
    let sv = extract(&three_block_graph(), None).unwrap();
    let curve = profile(&sv, None);
    assert_eq!(curve.len(), 14);
    let peak = curve
        .iter()
        .filter(|s| s.is_finite())
        .max_by(|a, b| a.log_likelihood.total_cmp(&b.log_likelihood))
        .unwrap();
    assert_eq!(peak.q, search(&sv, None, Parallelism::Sequential));
}

// ── Spectrum extraction ─────────────────────────────────────────────

#[test]
fn singular_values_match_nalgebra() {
    let mut rng = StdRng::seed_from_u64(3);
    for &(m, n) in &[(12, 12), (20, 7), (6, 15)] {
        let a = random_matrix(&mut rng, m, n, 1.0);
        let ours = extract(&a, None).unwrap();

        let na = nalgebra::DMatrix::from_fn(m, n, |i, j| a[(i, j)]);
        let mut theirs: Vec<f64> = na.singular_values().iter().copied().collect();
        theirs.sort_by(|a, b| b.total_cmp(a));

        assert_eq!(ours.len(), theirs.len());
        for (k, (x, y)) in ours.iter().zip(&theirs).enumerate() {
            assert_near(*x, *y, TOL, &format!("{}x{} sigma[{}]", m, n, k));
        }
    }
}

#[test]
fn full_triplets_reconstruct_input() {
    let mut rng = StdRng::seed_from_u64(11);
    for &(m, n) in &[(9, 9), (10, 4), (4, 10)] {
        let a = random_matrix(&mut rng, m, n, 2.0);
        let svd = extract_with_vectors(&a, None).unwrap();
        let r = svd.reconstruct();
        for i in 0..m {
            for j in 0..n {
                assert_near(r[(i, j)], a[(i, j)], TOL, &format!("{}x{} ({}, {})", m, n, i, j));
            }
        }
    }
}

#[test]
fn truncated_triplets_give_best_low_rank_error() {
    let a = three_block_graph();
    let sv = extract(&a, None).unwrap();
    let approx = extract_with_vectors(&a, Some(3)).unwrap().reconstruct();

    // Frobenius error of the rank-3 truncation is the tail of the spectrum
    let mut err2 = 0.0;
    for i in 0..15 {
        for j in 0..15 {
            let d = a[(i, j)] - approx[(i, j)];
            err2 += d * d;
        }
    }
    let tail2: f64 = sv[3..].iter().map(|s| s * s).sum();
    assert_near(err2, tail2, 1e-8, "rank-3 residual");
}

#[test]
fn dimension_is_scale_invariant() {
    let a = three_block_graph();
    let base = extract(&a, None).unwrap();
    let settings = DimensionSettings::default().with_parallelism(Parallelism::Sequential);
    for &c in &[1e-20_f64, 1e-17, 1e20] {
        let scaled = DynMatrix::from_fn(15, 15, |i, j| c * a[(i, j)]);
        let sv = extract(&scaled, None).unwrap();
        for (k, (x, y)) in sv.iter().zip(base.iter()).enumerate() {
            assert_near(x / c, *y, TOL * base[0], &format!("c={:e} sigma[{}]", c, k));
        }
        assert_eq!(estimate(&scaled, None, &settings), Ok(3), "c={:e}", c);
    }
}

#[test]
fn wide_and_tall_share_spectrum() {
    let a = DynMatrix::from_fn(5, 11, |i, j| ((i + 2 * j) as f64 * 0.37).sin() + 0.1 * i as f64);
    let wide = extract(&a, None).unwrap();
    let tall = extract(&a.transpose(), None).unwrap();
    for (x, y) in wide.iter().zip(tall.iter()) {
        assert_near(*x, *y, TOL, "sigma");
    }
}
