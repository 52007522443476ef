use crate::linalg::{givens, negate_column, rotate_columns, swap_columns, LinalgError};
use crate::traits::{FloatScalar, MatrixMut};

// ── Householder bidiagonalization ───────────────────────────────────

/// Reduce an M×N matrix (M ≥ N) to upper bidiagonal form in place.
///
/// On return `diag[0..n]` holds the bidiagonal diagonal and
/// `off_diag[0..n-1]` its superdiagonal. When given, `u` (M×M) and
/// `v` (N×N) are overwritten with the accumulated orthogonal transforms so
/// that `A = U · B · Vᵀ`. The contents of `a` are destroyed.
pub fn bidiagonalize<T, A, U, V>(
    a: &mut A,
    diag: &mut [T],
    off_diag: &mut [T],
    mut u: Option<&mut U>,
    mut v: Option<&mut V>,
) where
    T: FloatScalar,
    A: MatrixMut<T>,
    U: MatrixMut<T>,
    V: MatrixMut<T>,
{
    let m = a.nrows();
    let n = a.ncols();
    assert!(m >= n, "bidiagonalize requires M >= N");
    assert!(diag.len() >= n);
    assert!(off_diag.len() + 1 >= n);

    if let Some(u) = u.as_deref_mut() {
        u.set_identity();
    }
    if let Some(v) = v.as_deref_mut() {
        v.set_identity();
    }

    // Cut-off relative to the largest column.
    let max_col_sq = (0..n).fold(T::zero(), |acc, j| {
        acc.max((0..m).fold(T::zero(), |s, i| s + *a.get(i, j) * *a.get(i, j)))
    });
    let tiny = T::epsilon() * T::epsilon() * max_col_sq;

    for k in 0..n {
        // Left reflector on column k, rows k..m.
        let norm_sq = (k..m).fold(T::zero(), |acc, i| acc + *a.get(i, k) * *a.get(i, k));
        if norm_sq > tiny {
            let head = *a.get(k, k);
            let sigma = reflector_sign(head, norm_sq.sqrt());
            let v0 = head + sigma;
            let tau = v0 / sigma;

            // Store the reflector below the diagonal, normalized so v[k] = 1.
            *a.get_mut(k, k) = v0;
            for i in (k + 1)..m {
                *a.get_mut(i, k) = *a.get(i, k) / v0;
            }

            for j in (k + 1)..n {
                let mut dot = *a.get(k, j);
                for i in (k + 1)..m {
                    dot = dot + *a.get(i, k) * *a.get(i, j);
                }
                dot = dot * tau;
                *a.get_mut(k, j) = *a.get(k, j) - dot;
                for i in (k + 1)..m {
                    *a.get_mut(i, j) = *a.get(i, j) - dot * *a.get(i, k);
                }
            }

            if let Some(u) = u.as_deref_mut() {
                for row in 0..m {
                    let mut dot = *u.get(row, k);
                    for i in (k + 1)..m {
                        dot = dot + *u.get(row, i) * *a.get(i, k);
                    }
                    dot = dot * tau;
                    *u.get_mut(row, k) = *u.get(row, k) - dot;
                    for i in (k + 1)..m {
                        *u.get_mut(row, i) = *u.get(row, i) - dot * *a.get(i, k);
                    }
                }
            }

            diag[k] = -sigma;
        } else {
            diag[k] = *a.get(k, k);
        }

        if k + 1 >= n {
            continue;
        }
        if k + 2 == n {
            off_diag[k] = *a.get(k, k + 1);
            continue;
        }

        // Right reflector on row k, columns k+1..n.
        let norm_sq = ((k + 1)..n).fold(T::zero(), |acc, j| acc + *a.get(k, j) * *a.get(k, j));
        if norm_sq > tiny {
            let head = *a.get(k, k + 1);
            let sigma = reflector_sign(head, norm_sq.sqrt());
            let v0 = head + sigma;
            let tau = v0 / sigma;

            *a.get_mut(k, k + 1) = v0;
            for j in (k + 2)..n {
                *a.get_mut(k, j) = *a.get(k, j) / v0;
            }

            for i in (k + 1)..m {
                let mut dot = *a.get(i, k + 1);
                for j in (k + 2)..n {
                    dot = dot + *a.get(i, j) * *a.get(k, j);
                }
                dot = dot * tau;
                *a.get_mut(i, k + 1) = *a.get(i, k + 1) - dot;
                for j in (k + 2)..n {
                    *a.get_mut(i, j) = *a.get(i, j) - dot * *a.get(k, j);
                }
            }

            if let Some(v) = v.as_deref_mut() {
                for row in 0..n {
                    let mut dot = *v.get(row, k + 1);
                    for j in (k + 2)..n {
                        dot = dot + *v.get(row, j) * *a.get(k, j);
                    }
                    dot = dot * tau;
                    *v.get_mut(row, k + 1) = *v.get(row, k + 1) - dot;
                    for j in (k + 2)..n {
                        *v.get_mut(row, j) = *v.get(row, j) - dot * *a.get(k, j);
                    }
                }
            }

            off_diag[k] = -sigma;
        } else {
            off_diag[k] = *a.get(k, k + 1);
        }
    }
}

/// `norm` carrying the sign of `head`, which keeps `head + sigma` away
/// from cancellation.
#[inline]
fn reflector_sign<T: FloatScalar>(head: T, norm: T) -> T {
    if head < T::zero() {
        -norm
    } else {
        norm
    }
}

// ── Golub-Kahan bidiagonal QR ───────────────────────────────────────

/// Golub-Kahan implicit-shift QR on an upper bidiagonal matrix.
///
/// On return `diag` holds the singular values, non-negative and sorted
/// descending, and `off_diag` is zeroed. Rotations are accumulated into the
/// columns of `u` and `v` when given.
///
/// Returns [`LinalgError::ConvergenceFailure`] if more than `max_iter` QR
/// sweeps are needed.
pub fn bidiagonal_qr<T, U, V>(
    diag: &mut [T],
    off_diag: &mut [T],
    mut u: Option<&mut U>,
    mut v: Option<&mut V>,
    max_iter: usize,
) -> Result<(), LinalgError>
where
    T: FloatScalar,
    U: MatrixMut<T>,
    V: MatrixMut<T>,
{
    let n = diag.len();
    let eps = T::epsilon();
    // Rotations preserve the norm, so one bound serves every sweep.
    let anorm = (0..n).fold(T::zero(), |acc, i| {
        let e = if i + 1 < n { off_diag[i].abs() } else { T::zero() };
        acc.max(diag[i].abs() + e)
    });
    let negligible = eps * anorm;
    let mut sweeps = 0usize;
    let mut hi = n.saturating_sub(1);

    while hi > 0 {
        if off_diag[hi - 1].abs() <= eps * (diag[hi - 1].abs() + diag[hi].abs()) {
            off_diag[hi - 1] = T::zero();
            hi -= 1;
            continue;
        }

        // Start of the unreduced block ending at `hi`.
        let mut lo = hi - 1;
        while lo > 0 {
            if off_diag[lo - 1].abs() <= eps * (diag[lo - 1].abs() + diag[lo].abs()) {
                off_diag[lo - 1] = T::zero();
                break;
            }
            lo -= 1;
        }

        sweeps += 1;
        if sweeps > max_iter {
            return Err(LinalgError::ConvergenceFailure);
        }

        // A zero on the diagonal breaks the shift; split the block instead.
        if let Some(idx) = (lo..hi).find(|&idx| diag[idx].abs() <= negligible) {
            chase_zero_diagonal(diag, off_diag, idx, hi, u.as_deref_mut());
            continue;
        }

        let shift = wilkinson_shift(diag, off_diag, lo, hi);
        qr_sweep(diag, off_diag, lo, hi, shift, u.as_deref_mut(), v.as_deref_mut());
    }

    for i in 0..n {
        if diag[i] < T::zero() {
            diag[i] = -diag[i];
            if let Some(u) = u.as_deref_mut() {
                negate_column(u, i);
            }
        }
    }

    // Selection sort, descending, keeping vector columns paired.
    for i in 0..n {
        let mut max_idx = i;
        for j in (i + 1)..n {
            if diag[j] > diag[max_idx] {
                max_idx = j;
            }
        }
        if max_idx != i {
            diag.swap(i, max_idx);
            if let Some(u) = u.as_deref_mut() {
                swap_columns(u, i, max_idx);
            }
            if let Some(v) = v.as_deref_mut() {
                swap_columns(v, i, max_idx);
            }
        }
    }

    Ok(())
}

/// Rotate the superdiagonal entry next to a zero `diag[idx]` off the bottom
/// of the block with left rotations, decoupling the problem at `idx`.
fn chase_zero_diagonal<T: FloatScalar, U: MatrixMut<T>>(
    diag: &mut [T],
    off_diag: &mut [T],
    idx: usize,
    hi: usize,
    mut u: Option<&mut U>,
) {
    diag[idx] = T::zero();
    let mut z = off_diag[idx];
    off_diag[idx] = T::zero();
    for j in (idx + 1)..=hi {
        let (c, s) = givens(diag[j], z);
        diag[j] = c * diag[j] + s * z;
        if j < hi {
            z = -s * off_diag[j];
            off_diag[j] = c * off_diag[j];
        }
        if let Some(u) = u.as_deref_mut() {
            rotate_columns(u, j, idx, c, s);
        }
    }
}

/// Eigenvalue of the trailing 2×2 of BᵀB closer to its last diagonal entry.
fn wilkinson_shift<T: FloatScalar>(diag: &[T], off_diag: &[T], lo: usize, hi: usize) -> T {
    let d_hi = diag[hi];
    let d_prev = diag[hi - 1];
    let e_prev = off_diag[hi - 1];
    let e_before = if hi >= lo + 2 { off_diag[hi - 2] } else { T::zero() };

    let t11 = d_prev * d_prev + e_before * e_before;
    let t12 = d_prev * e_prev;
    let t22 = d_hi * d_hi + e_prev * e_prev;

    let two = T::one() + T::one();
    let d = (t11 - t22) / two;
    let sign_d = if d >= T::zero() { T::one() } else { -T::one() };
    t22 - t12 * t12 / (d + sign_d * (d * d + t12 * t12).sqrt())
}

/// One implicit-shift QR sweep over `lo..=hi`, chasing the bulge down the
/// bidiagonal.
fn qr_sweep<T, U, V>(
    diag: &mut [T],
    off_diag: &mut [T],
    lo: usize,
    hi: usize,
    shift: T,
    mut u: Option<&mut U>,
    mut v: Option<&mut V>,
) where
    T: FloatScalar,
    U: MatrixMut<T>,
    V: MatrixMut<T>,
{
    let mut x = diag[lo] * diag[lo] - shift;
    let mut z = diag[lo] * off_diag[lo];

    for k in lo..hi {
        // Right rotation on columns k, k+1 zeroes z.
        let (c, s) = givens(x, z);
        if k > lo {
            off_diag[k - 1] = c * x + s * z;
        }

        let dk = diag[k];
        let ek = off_diag[k];
        let dk1 = diag[k + 1];
        diag[k] = c * dk + s * ek;
        off_diag[k] = c * ek - s * dk;
        let bulge = s * dk1;
        diag[k + 1] = c * dk1;

        if let Some(v) = v.as_deref_mut() {
            rotate_columns(v, k, k + 1, c, s);
        }

        // Left rotation on rows k, k+1 zeroes the bulge below the diagonal.
        let (c2, s2) = givens(diag[k], bulge);
        diag[k] = c2 * diag[k] + s2 * bulge;
        let ek = off_diag[k];
        let dk1 = diag[k + 1];
        off_diag[k] = c2 * ek + s2 * dk1;
        diag[k + 1] = c2 * dk1 - s2 * ek;

        if k + 1 < hi {
            let ek1 = off_diag[k + 1];
            x = off_diag[k];
            z = s2 * ek1;
            off_diag[k + 1] = c2 * ek1;
        }

        if let Some(u) = u.as_deref_mut() {
            rotate_columns(u, k, k + 1, c2, s2);
        }
    }
}
