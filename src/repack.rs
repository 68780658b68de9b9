//! Egress: transpose an iteration-major history into per-particle trajectories.
//!
//! The integrator returns one entry per iteration, each holding every
//! particle's state at that iteration. A renderer instead wants one entry
//! per particle, holding that particle's trajectory across every iteration.
//! This module performs that transpose; grounded in
//! `original_source/util.py`'s `repack_*_for_manim` helpers.

use ndarray::Array2;

use crate::state::{State, UrgencySnapshot};

/// One particle's (or predator's) `(H, d)` position/velocity/acceleration
/// trajectory across `H` recorded iterations.
#[derive(Debug, Clone)]
pub struct ParticleTrajectory {
    pub position: Array2<f64>,
    pub velocity: Array2<f64>,
    pub acceleration: Array2<f64>,
}

/// One particle's `(H, d)` trajectory per urgency component, across `H`
/// recorded iterations.
#[derive(Debug, Clone)]
pub struct UrgencyTrajectory {
    pub cohesion: Array2<f64>,
    pub personal_space: Array2<f64>,
    pub predator_escape: Array2<f64>,
}

/// Transpose particle history into one trajectory per particle.
pub fn repack_particle_trajectories(states: &[State]) -> Vec<ParticleTrajectory> {
    repack_triples(states, |s| (&s.p, &s.v, &s.a), State::n)
}

/// Transpose predator history into one trajectory per predator.
pub fn repack_predator_trajectories(states: &[State]) -> Vec<ParticleTrajectory> {
    repack_triples(states, |s| (&s.p_pred, &s.v_pred, &s.a_pred), State::m)
}

fn repack_triples(
    states: &[State],
    select: impl Fn(&State) -> (&Array2<f64>, &Array2<f64>, &Array2<f64>),
    count: impl Fn(&State) -> usize,
) -> Vec<ParticleTrajectory> {
    let Some(first) = states.first() else {
        return Vec::new();
    };
    let n = count(first);
    let h = states.len();
    let d = select(first).0.ncols();

    (0..n)
        .map(|idx| {
            let mut position = Array2::<f64>::zeros((h, d));
            let mut velocity = Array2::<f64>::zeros((h, d));
            let mut acceleration = Array2::<f64>::zeros((h, d));
            for (t, state) in states.iter().enumerate() {
                let (p, v, a) = select(state);
                for k in 0..d {
                    position[[t, k]] = p[[idx, k]];
                    velocity[[t, k]] = v[[idx, k]];
                    acceleration[[t, k]] = a[[idx, k]];
                }
            }
            ParticleTrajectory {
                position,
                velocity,
                acceleration,
            }
        })
        .collect()
}

/// Transpose urgency history into one `(K, H, d)` trajectory per particle,
/// represented as three named `(H, d)` arrays rather than a literal
/// 3-tensor.
pub fn repack_urgency_trajectories(
    urgencies: &[UrgencySnapshot],
    num_particles: usize,
) -> Vec<UrgencyTrajectory> {
    let Some(first) = urgencies.first() else {
        return Vec::new();
    };
    let h = urgencies.len();
    let d = first.cohesion.ncols();

    (0..num_particles)
        .map(|idx| {
            let mut cohesion = Array2::<f64>::zeros((h, d));
            let mut personal_space = Array2::<f64>::zeros((h, d));
            let mut predator_escape = Array2::<f64>::zeros((h, d));
            for (t, snap) in urgencies.iter().enumerate() {
                for k in 0..d {
                    cohesion[[t, k]] = snap.cohesion[[idx, k]];
                    personal_space[[t, k]] = snap.personal_space[[idx, k]];
                    predator_escape[[t, k]] = snap.predator_escape[[idx, k]];
                }
            }
            UrgencyTrajectory {
                cohesion,
                personal_space,
                predator_escape,
            }
        })
        .collect()
}
