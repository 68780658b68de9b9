//! Seedable, reproducible RNG for matrix-shaped draws.
//!
//! Every draw goes through [`RandomSource::uniform_matrix`], filling row by
//! row, column by column. That ordering -- not just the seed -- is what
//! makes two runs with the same inputs bitwise identical: the integrator
//! fixes the *number and shape* of draws it performs each step (see
//! `integrator`), and this type fixes the order *within* a draw.

use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Multiplicative noise half-width used throughout the engine.
pub const EPSILON: f64 = 1e-3;

/// Default seed, chosen so that unseeded runs are still reproducible.
pub const DEFAULT_SEED: u64 = 133_713_371_337;

/// A seeded source of uniform matrices.
#[derive(Clone)]
pub struct RandomSource {
    rng: ChaCha12Rng,
}

impl RandomSource {
    /// Construct a deterministic source from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Construct a deterministic source using [`DEFAULT_SEED`].
    pub fn default_seeded() -> Self {
        Self::new(DEFAULT_SEED)
    }

    /// Draw a fresh `(rows, cols)` matrix of i.i.d. samples from `[lo, hi)`.
    ///
    /// Samples are drawn in row-major order; this is observable and part of
    /// the reproducibility contract, not an implementation detail.
    pub fn uniform_matrix(&mut self, rows: usize, cols: usize, lo: f64, hi: f64) -> Array2<f64> {
        let mut out = Array2::<f64>::zeros((rows, cols));
        for i in 0..rows {
            for j in 0..cols {
                out[[i, j]] = self.rng.random_range(lo..hi);
            }
        }
        out
    }

    /// Draw a `shape` matrix of multiplicative noise in `[1 - EPSILON, 1 + EPSILON)`.
    pub fn epsilon_matrix(&mut self, shape: (usize, usize)) -> Array2<f64> {
        self.uniform_matrix(shape.0, shape.1, 1.0 - EPSILON, 1.0 + EPSILON)
    }
}
