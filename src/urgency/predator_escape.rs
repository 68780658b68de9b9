//! u3: repel each particle from the (non-reactive) predator set.

use ndarray::Array2;

use crate::config::Config;
use crate::random::RandomSource;
use crate::state::State;
use crate::vector_ops::{cdist, weighted_relative_sum};

/// Compute u3 against the predator set `state.p_pred`.
///
/// If `M == 0` the cross-distance computation is skipped entirely and the
/// raw field is the zero matrix, but the epsilon draw below is still
/// performed (with shape `(N, d)`) so the number and shape of RNG draws per
/// step stays stable regardless of predator count.
pub fn predator_escape(state: &State, config: &Config, rng: &mut RandomSource) -> Array2<f64> {
    let n = state.n();
    let d = state.d();
    let m = state.m();

    let raw = if m == 0 {
        Array2::<f64>::zeros((n, d))
    } else {
        let dist = cdist(&state.p, &state.p_pred);
        let mut h = Array2::<f64>::zeros((n, m));
        for i in 0..n {
            for k in 0..m {
                let dik = dist[[i, k]];
                if dik > 0.0 && dik <= config.u3_dmax {
                    h[[i, k]] = (config.u3_dmax - dik) / (config.u3_dmax * dik);
                }
            }
        }
        weighted_relative_sum(&h, &state.p, &state.p_pred)
    };

    super::finalize(raw, rng, config.u3_p, config.w.column(2))
}
