//! # Training a small MLP on a four-sample binary classification task
//!
//! This example walks through the full training loop of `neurograd-core`:
//!
//! 1.  **Model**: an `Mlp` with 3 inputs, two hidden layers of 4 tanh neurons and one
//!     linear output.
//! 2.  **Loss**: `MSELoss` with `Reduction::Sum`.
//! 3.  **Manual training loop**:
//!     -   forward pass over the four samples,
//!     -   loss computation and `backward`,
//!     -   gradient-descent update through `Parameter::descend`,
//!     -   `zero_grad`, which also discards the step's intermediate nodes.
//!
//! ## Running
//! `RUST_LOG=info cargo run --example binary_classifier`

use log::info;
use neurograd_core::{Activation, MSELoss, Mlp, Module, NeuraGradError, Reduction, Tape};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), NeuraGradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = [1.0, -1.0, -1.0, 1.0];

    let tape = Tape::new();
    let mlp = Mlp::with_rng(&tape, 3, &[4, 4, 1], &mut StdRng::seed_from_u64(42))?
        .with_activation(Activation::Tanh);
    info!("MLP created with {} parameters", mlp.num_parameters());

    let loss_fn = MSELoss::new(Reduction::Sum);
    let learning_rate = 0.05;
    let num_epochs = 100;

    for epoch in 0..num_epochs {
        let predictions = xs
            .iter()
            .map(|x| mlp.predict(x).map(|mut out| out.remove(0)))
            .collect::<Result<Vec<_>, _>>()?;

        let loss = loss_fn.calculate(&predictions, &ys)?;
        loss.backward()?;

        if epoch % 10 == 0 || epoch == num_epochs - 1 {
            info!(
                "epoch {:>3}: loss = {:.6}, nodes on tape = {}",
                epoch,
                loss.data(),
                tape.len()
            );
        }

        for p in mlp.parameters() {
            p.descend(learning_rate);
        }
        mlp.zero_grad();
    }

    for (x, y) in xs.iter().zip(ys) {
        let out = mlp.predict(x)?;
        info!("{:?} -> {:+.4} (target {:+})", x, out[0].data(), y);
    }
    Ok(())
}
