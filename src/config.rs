//! Species-wide scalar parameters plus the per-individual urgency weight matrix.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of urgency components (cohesion, personal-space, predator-escape).
///
/// A historical variant of the source simulation carried a 4th, unused
/// urgency slot; this port treats K=3 as canonical.
pub const K: usize = 3;

/// Immutable species-wide configuration plus the per-individual weight matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Max linear velocity.
    pub v_max: f64,
    /// Per-unit-time exponential velocity damping, in `(0, 1]`.
    pub v_decay: f64,
    /// Max linear acceleration.
    pub a_max: f64,
    /// Max sight distance used by cohesion.
    pub d_max: f64,
    /// Urgency magnitude that corresponds to `a_max`.
    pub u_max: f64,
    /// Linear parameter for cohesion.
    pub u1_p: f64,
    /// Linear parameter for personal-space.
    pub u2_p: f64,
    /// Preferred inter-particle distance; personal-space force is zero here.
    pub u2_dopt: f64,
    /// Linear parameter for predator-escape.
    pub u3_p: f64,
    /// Max predator-detection distance.
    pub u3_dmax: f64,
    /// `(N, K)` per-individual multiplicative weights.
    pub w: Array2<f64>,
}

impl Config {
    /// Validate scalar ranges and the shape of `w` against the particle count `n`.
    ///
    /// `d_max`, `u2_dopt`, `u3_dmax`, `u1_p`, `u2_p`, `u3_p` are allowed to be
    /// zero: a zero "optimal"/"max" distance structurally disables the
    /// corresponding component (the `in_range` mask excludes it, so it is
    /// never used as a divisor), and a zero linear parameter scales that
    /// component's contribution away entirely. `v_max`, `a_max`, `u_max`
    /// are unconditional divisors/clip radii and must be strictly positive.
    pub fn validate(&self, n: usize) -> Result<(), EngineError> {
        let strictly_positive = [
            ("v_max", self.v_max),
            ("a_max", self.a_max),
            ("u_max", self.u_max),
        ];
        for (name, value) in strictly_positive {
            if !(value > 0.0) {
                return Err(EngineError::InvalidParameter {
                    name,
                    reason: "must be strictly positive",
                });
            }
        }

        let non_negative = [
            ("d_max", self.d_max),
            ("u1_p", self.u1_p),
            ("u2_p", self.u2_p),
            ("u2_dopt", self.u2_dopt),
            ("u3_p", self.u3_p),
            ("u3_dmax", self.u3_dmax),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(EngineError::InvalidParameter {
                    name,
                    reason: "must be non-negative",
                });
            }
        }

        if !(self.v_decay > 0.0 && self.v_decay <= 1.0) {
            return Err(EngineError::InvalidParameter {
                name: "v_decay",
                reason: "must be in (0, 1]",
            });
        }

        if self.w.shape() != [n, K] {
            return Err(EngineError::ShapeMismatch {
                what: "config.w",
                expected: (n, K),
                got: (self.w.nrows(), self.w.ncols()),
            });
        }

        Ok(())
    }
}
