//! Owns the per-step pipeline, the run loop, and history/urgency capture.

use ndarray::Array2;

use crate::config::Config;
use crate::error::EngineError;
use crate::random::RandomSource;
use crate::state::{State, UrgencySnapshot};
use crate::urgency::{cohesion, personal_space, predator_escape};
use crate::vector_ops::{clip_row_abs, pdist};

/// Per-run knobs: step size, step count, history-skip prelude, and whether
/// to capture per-step urgency fields alongside the state history.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub timestep: f64,
    pub iterations: usize,
    pub skip_initial_states: usize,
    pub return_urgency_vectors: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timestep: 1.0,
            iterations: 0,
            skip_initial_states: 0,
            return_urgency_vectors: false,
        }
    }
}

impl RunOptions {
    fn validate(&self) -> Result<(), EngineError> {
        if !(self.timestep > 0.0) {
            return Err(EngineError::InvalidRunConfig {
                reason: "timestep must be strictly positive",
            });
        }
        Ok(())
    }
}

/// The result of a [`Integrator::run`] call: an always-present state
/// history, plus an optional urgency history.
///
/// `urgencies`, when present, has one entry per *post-step* iteration that
/// was recorded (the same skip policy as `states`, but with no entry for
/// the un-stepped initial state) -- there is no urgency field to capture
/// before the first step has run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub states: Vec<State>,
    pub urgencies: Option<Vec<UrgencySnapshot>>,
}

/// Owns a `State` and a `Config` for the duration of a run.
pub struct Integrator {
    state: State,
    config: Config,
    rng: RandomSource,
}

impl Integrator {
    /// Validate `state` against `config` and take ownership of both.
    pub fn new(state: State, config: Config, rng: RandomSource) -> Result<Self, EngineError> {
        config.validate(state.n())?;
        Ok(Self { state, config, rng })
    }

    /// Construct an integrator seeded with the engine's default seed.
    pub fn with_default_seed(state: State, config: Config) -> Result<Self, EngineError> {
        Self::new(state, config, RandomSource::default_seeded())
    }

    /// Run the simulation for `opts.iterations` steps, returning the
    /// recorded history (and, if requested, the recorded urgency fields).
    pub fn run(&mut self, opts: RunOptions) -> Result<RunResult, EngineError> {
        opts.validate()?;
        tracing::info!(
            target: "shoal.integrator",
            iterations = opts.iterations,
            skip_initial_states = opts.skip_initial_states,
            n = self.state.n(),
            m = self.state.m(),
            "run starting"
        );

        let mut working = self.state.clone();
        let skip = opts.skip_initial_states;

        let mut states = Vec::with_capacity(opts.iterations + 1);
        let mut urgencies = opts.return_urgency_vectors.then(|| Vec::with_capacity(opts.iterations));

        if skip == 0 {
            states.push(working.clone());
        }

        for i in 1..=opts.iterations {
            let snapshot = self.step(&mut working, opts.timestep);
            if i >= skip {
                states.push(working.clone());
                if let Some(history) = urgencies.as_mut() {
                    history.push(snapshot);
                }
            }
        }

        tracing::info!(
            target: "shoal.integrator",
            recorded_states = states.len(),
            "run finished"
        );

        Ok(RunResult { states, urgencies })
    }

    /// One discrete timestep: urgency assembly, clipping, noise, explicit
    /// Euler integration of particles, and the independent predator
    /// sub-step. Returns the pre-clip, noise-multiplied urgency fields for
    /// optional capture.
    ///
    /// Draw order (fixed, and part of the reproducibility contract): eps
    /// for u1, eps for u2, eps for u3, eps for the final acceleration, eps
    /// for the predator acceleration.
    fn step(&mut self, state: &mut State, dt: f64) -> UrgencySnapshot {
        let d = pdist(&state.p);

        let u1 = cohesion(state, &self.config, &d, &mut self.rng);
        let u2 = personal_space(state, &self.config, &d, &mut self.rng);
        let u3 = predator_escape(state, &self.config, &mut self.rng);

        let mut a: Array2<f64> = &u1 + &u2 + &u3;
        a *= self.config.a_max / self.config.u_max;
        clip_row_abs(&mut a, self.config.a_max);

        let eps_a = self.rng.epsilon_matrix((state.n(), state.d()));
        a *= &eps_a;

        let decay = self.config.v_decay.powf(dt);
        state.v.mapv_inplace(|x| x * decay);
        state.v = &state.v + &(&a * dt);
        clip_row_abs(&mut state.v, self.config.v_max);
        state.p = &state.p + &(&state.v * dt);
        state.a = a;

        let eps_a_pred = self.rng.epsilon_matrix((state.m(), state.d()));
        state.a_pred *= &eps_a_pred;
        state.v_pred = &state.v_pred + &(&state.a_pred * dt);
        state.p_pred = &state.p_pred + &(&state.v_pred * dt);

        tracing::trace!(target: "shoal.integrator", dt, "step");

        UrgencySnapshot {
            cohesion: u1,
            personal_space: u2,
            predator_escape: u3,
        }
    }
}
