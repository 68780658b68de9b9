//! The three urgency components: cohesion, personal-space, predator-escape.
//!
//! Each returns a raw `(N, d)` field in the particles' own frame, then all
//! three are put through the same [`finalize`] post-processing: a fresh
//! epsilon draw, the species-wide linear scalar, and the per-individual
//! weight column. All three components share this transform, so it is
//! written once here instead of duplicated per component.

mod cohesion;
mod personal_space;
mod predator_escape;

pub use cohesion::cohesion;
pub use personal_space::personal_space;
pub use predator_escape::predator_escape;

use ndarray::{Array2, ArrayView1, Axis};

use crate::random::RandomSource;

/// Apply the shared epsilon/scalar/weight-column finalization to a raw
/// `(N, d)` urgency field.
pub(crate) fn finalize(
    mut raw: Array2<f64>,
    rng: &mut RandomSource,
    scalar: f64,
    w_col: ArrayView1<f64>,
) -> Array2<f64> {
    let shape = (raw.nrows(), raw.ncols());
    let eps = rng.epsilon_matrix(shape);
    raw *= &eps;
    raw *= scalar;
    for (mut row, &wi) in raw.axis_iter_mut(Axis(0)).zip(w_col.iter()) {
        row *= wi;
    }
    raw
}
