//! u2: push each particle away from neighbors that are too close.

use ndarray::Array2;

use crate::config::Config;
use crate::random::RandomSource;
use crate::state::State;
use crate::vector_ops::weighted_relative_sum;

/// Compute u2 from the precomputed pairwise distance matrix `d`.
///
/// The force magnitude is linear in `(u2_dopt - D)`, reaching zero exactly
/// at `D = u2_dopt` and growing without bound as `D -> 0+`; the later
/// acceleration-level clip is what ultimately saturates it. `u2_dopt == 0`
/// disables the component entirely: no positive `D` can satisfy `D <= 0`,
/// so `h` stays all-zero and the `u2_dopt` divisor is never reached.
pub fn personal_space(state: &State, config: &Config, d: &Array2<f64>, rng: &mut RandomSource) -> Array2<f64> {
    let n = state.n();
    let mut h = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..n {
            let dist = d[[i, j]];
            if dist > 0.0 && dist <= config.u2_dopt {
                h[[i, j]] = (config.u2_dopt - dist) / (config.u2_dopt * dist);
            }
        }
    }

    let raw = weighted_relative_sum(&h, &state.p, &state.p);
    super::finalize(raw, rng, config.u2_p, config.w.column(1))
}
