//! Mutable particle/predator state and the per-step urgency snapshot.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A full simulation state: particle kinematics plus predator kinematics.
///
/// `p`, `v`, `a` share shape `(N, d)`; `p_pred`, `v_pred`, `a_pred` share
/// shape `(M, d)` with `M` possibly `0`. Cloning a `State` is a deep copy of
/// every owned matrix buffer, which is what makes history snapshots
/// immutable with respect to later mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub p: Array2<f64>,
    pub v: Array2<f64>,
    pub a: Array2<f64>,
    pub p_pred: Array2<f64>,
    pub v_pred: Array2<f64>,
    pub a_pred: Array2<f64>,
}

impl State {
    /// Construct a state with an explicit predator block, validating that
    /// the particle triple and the predator triple are each shape-consistent.
    pub fn new(
        p: Array2<f64>,
        v: Array2<f64>,
        a: Array2<f64>,
        p_pred: Array2<f64>,
        v_pred: Array2<f64>,
        a_pred: Array2<f64>,
    ) -> Result<Self, EngineError> {
        Self::check_triple("particle", &p, &v, &a)?;
        Self::check_triple("predator", &p_pred, &v_pred, &a_pred)?;
        if p.ncols() != p_pred.ncols() && p_pred.nrows() > 0 {
            return Err(EngineError::ShapeMismatch {
                what: "predator dimensionality",
                expected: (p_pred.nrows(), p.ncols()),
                got: (p_pred.nrows(), p_pred.ncols()),
            });
        }
        Ok(Self {
            p,
            v,
            a,
            p_pred,
            v_pred,
            a_pred,
        })
    }

    /// Construct a state with no predators (`M = 0`).
    pub fn without_predators(p: Array2<f64>, v: Array2<f64>, a: Array2<f64>) -> Result<Self, EngineError> {
        let d = p.ncols();
        let empty = Array2::<f64>::zeros((0, d));
        Self::new(p, v, a, empty.clone(), empty.clone(), empty)
    }

    fn check_triple(
        what: &'static str,
        p: &Array2<f64>,
        v: &Array2<f64>,
        a: &Array2<f64>,
    ) -> Result<(), EngineError> {
        if p.shape() != v.shape() {
            return Err(EngineError::ShapeMismatch {
                what,
                expected: (p.nrows(), p.ncols()),
                got: (v.nrows(), v.ncols()),
            });
        }
        if p.shape() != a.shape() {
            return Err(EngineError::ShapeMismatch {
                what,
                expected: (p.nrows(), p.ncols()),
                got: (a.nrows(), a.ncols()),
            });
        }
        Ok(())
    }

    /// Number of particles, `N`.
    pub fn n(&self) -> usize {
        self.p.nrows()
    }

    /// Spatial dimensionality, `d`.
    pub fn d(&self) -> usize {
        self.p.ncols()
    }

    /// Number of predators, `M`.
    pub fn m(&self) -> usize {
        self.p_pred.nrows()
    }
}

/// Per-step raw urgency fields, captured before the acceleration-level
/// clipping/noise stages, when `return_urgency_vectors` is set. Each field
/// has shape `(N, d)`; the three named arrays stand in for what would
/// otherwise be a single `(3, N, d)` tensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgencySnapshot {
    pub cohesion: Array2<f64>,
    pub personal_space: Array2<f64>,
    pub predator_escape: Array2<f64>,
}
