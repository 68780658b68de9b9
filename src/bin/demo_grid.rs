//! Thin demo: a square lattice of particles with one predator sweeping past.
//!
//! Not part of the library's public surface; exists to exercise the crate
//! the way a real caller would. Scene/camera rendering is out of scope.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array2, array};

use shoal::config::K;
use shoal::{Config, Integrator, RandomSource, RunOptions, State};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let side_len = 4;
    let dims = 2;
    let p = shoal::scenario::lattice_positions(side_len, dims);
    let n = p.nrows();

    let p_pred = array![[-5.0, 1.5]];
    let v_pred = array![[1.0, 0.0]];
    let a_pred = Array2::<f64>::zeros((1, dims));

    let state = State::new(
        p,
        Array2::<f64>::zeros((n, dims)),
        Array2::<f64>::zeros((n, dims)),
        p_pred,
        v_pred,
        a_pred,
    )
    .context("building initial state")?;

    let config = Config {
        v_max: 4.0,
        v_decay: 0.98,
        a_max: 6.0,
        d_max: 2.5,
        u_max: 6.0,
        u1_p: 1.0,
        u2_p: 1.5,
        u2_dopt: 0.9,
        u3_p: 2.0,
        u3_dmax: 3.0,
        w: Array2::ones((n, K)),
    };

    let mut engine = Integrator::new(state, config, RandomSource::default_seeded())
        .context("validating engine inputs")?;

    let iterations = 200;
    let pb = ProgressBar::new(iterations as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message("simulating");

    let result = engine.run(RunOptions {
        timestep: 0.05,
        iterations,
        skip_initial_states: 0,
        return_urgency_vectors: false,
    })?;
    pb.finish_with_message("done");

    println!("recorded {} states for {} particles", result.states.len(), n);
    Ok(())
}
