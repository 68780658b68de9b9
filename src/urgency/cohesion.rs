//! u1: attract each particle toward the centroid of its visible neighbors.

use ndarray::Array2;

use crate::config::Config;
use crate::random::RandomSource;
use crate::state::State;
use crate::vector_ops::weighted_relative_sum;

/// Compute u1 from the precomputed pairwise distance matrix `d`.
///
/// Isolated particles (no neighbor within `d_max`) contribute zero
/// cohesion: their row of `h` stays all-zero, so `weighted_relative_sum`
/// yields the zero vector for that row.
pub fn cohesion(state: &State, config: &Config, d: &Array2<f64>, rng: &mut RandomSource) -> Array2<f64> {
    let n = state.n();
    let mut h = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        let count = (0..n)
            .filter(|&j| d[[i, j]] > 0.0 && d[[i, j]] <= config.d_max)
            .count();
        if count == 0 {
            continue;
        }
        let w = 1.0 / count as f64;
        for j in 0..n {
            if d[[i, j]] > 0.0 && d[[i, j]] <= config.d_max {
                h[[i, j]] = w;
            }
        }
    }

    // weighted_relative_sum gives Σ H[i,j]·(P_i - P_j) = P_i - C_i (since
    // the weights in each nonzero row sum to 1); negate to get C_i - P_i.
    let mut toward_centroid = weighted_relative_sum(&h, &state.p, &state.p);
    toward_centroid.mapv_inplace(|x| -x);

    super::finalize(toward_centroid, rng, config.u1_p, config.w.column(0))
}
