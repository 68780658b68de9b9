//! Pure numeric helpers over `(N, d)` matrices.
//!
//! These never materialize an `(N, M, d)` relative-vector tensor; the
//! weighted reduction in [`weighted_relative_sum`] accumulates directly
//! instead, since materializing the tensor is unnecessary work for a dense
//! O(N^2*d) kernel.

use ndarray::{Array1, Array2, ArrayView1, Axis, parallel::prelude::*};

#[inline]
fn euclid_dist(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

/// Symmetric pairwise distance matrix. `D[i,i] == 0`.
pub fn pdist(p: &Array2<f64>) -> Array2<f64> {
    let n = p.nrows();
    let mut d = Array2::<f64>::zeros((n, n));
    if n < 2 {
        return d;
    }

    // Each row only needs its upper-triangle entries; mirror afterwards.
    let rows: Vec<Array1<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut row = Array1::<f64>::zeros(n);
            let p_i = p.row(i);
            for j in (i + 1)..n {
                row[j] = euclid_dist(p_i, p.row(j));
            }
            row
        })
        .collect();

    for i in 0..n {
        for j in (i + 1)..n {
            d[[i, j]] = rows[i][j];
            d[[j, i]] = rows[i][j];
        }
    }
    d
}

/// Cross distance matrix `D'[i,k] = ||P_i - Q_k||`, shape `(P.nrows(), Q.nrows())`.
pub fn cdist(p: &Array2<f64>, q: &Array2<f64>) -> Array2<f64> {
    let n = p.nrows();
    let m = q.nrows();
    let mut d = Array2::<f64>::zeros((n, m));
    if m == 0 {
        return d;
    }

    d.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let p_i = p.row(i);
            for k in 0..m {
                row[k] = euclid_dist(p_i, q.row(k));
            }
        });
    d
}

/// In-place row-norm clipping: rows whose Euclidean norm exceeds `r` are
/// scaled down to exactly `r`; rows within bound are left untouched.
pub fn clip_row_abs(x: &mut Array2<f64>, r: f64) {
    x.axis_iter_mut(Axis(0)).into_par_iter().for_each(|mut row| {
        let norm_sq: f64 = row.iter().map(|v| v * v).sum();
        let r_sq = r * r;
        if norm_sq > r_sq {
            let scale = r / norm_sq.sqrt();
            row.iter_mut().for_each(|v| *v *= scale);
        }
    });
}

/// `R_i = Σ_j H[i,j] · (P_i − Q_j)`, without materializing the relative
/// vector tensor. `h` has shape `(P.nrows(), Q.nrows())`.
pub fn weighted_relative_sum(h: &Array2<f64>, p: &Array2<f64>, q: &Array2<f64>) -> Array2<f64> {
    let n = p.nrows();
    let d = p.ncols();
    let m = q.nrows();
    let mut r = Array2::<f64>::zeros((n, d));
    if m == 0 {
        return r;
    }

    r.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut out_row)| {
            let p_i = p.row(i);
            for j in 0..m {
                let w = h[[i, j]];
                if w == 0.0 {
                    continue;
                }
                let q_j = q.row(j);
                for k in 0..d {
                    out_row[k] += w * (p_i[k] - q_j[k]);
                }
            }
        });
    r
}
