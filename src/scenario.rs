//! Thin scenario-building helpers.
//!
//! The engine treats scenario construction as an external concern; this
//! module carries only a `d`-dimensional integer Cartesian lattice of side
//! length `s` (`N = s^d` particles), not the camera/animation scene classes
//! that sit on top of it in the source material.

use ndarray::{Array2, Axis};

use crate::state::State;

/// Build the positions of a `side_len^dims`-particle integer Cartesian
/// lattice, e.g. `lattice_positions(3, 2)` lays out a 3x3 grid of 9
/// particles at integer coordinates `(0,0)..(2,2)`.
///
/// Particles are ordered so the first axis varies slowest, matching a
/// row-major flattening of the `dims`-dimensional grid.
pub fn lattice_positions(side_len: usize, dims: usize) -> Array2<f64> {
    let n = side_len.pow(dims as u32);
    let mut p = Array2::<f64>::zeros((n, dims));
    for (idx, mut row) in p.axis_iter_mut(Axis(0)).enumerate() {
        let mut rem = idx;
        for axis in (0..dims).rev() {
            row[axis] = (rem % side_len) as f64;
            rem /= side_len;
        }
    }
    p
}

/// Build an initially-at-rest `State` (zero velocity, zero acceleration,
/// no predators) from a given set of initial positions.
pub fn zero_state(p: Array2<f64>) -> Result<State, crate::error::EngineError> {
    let shape = (p.nrows(), p.ncols());
    let v = Array2::<f64>::zeros(shape);
    let a = Array2::<f64>::zeros(shape);
    State::without_predators(p, v, a)
}
