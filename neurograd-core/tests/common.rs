use neurograd_core::{Tape, Value};

/// Installs `env_logger` once for the test binary; `RUST_LOG=neurograd_core=trace`
/// shows every recorded node.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn leaves(tape: &Tape, xs: &[f64]) -> Vec<Value> {
    xs.iter().map(|&x| tape.leaf(x)).collect()
}

/// The four-sample binary classification set of the classic MLP demo.
#[allow(dead_code)]
pub fn toy_dataset() -> (Vec<[f64; 3]>, Vec<f64>) {
    let xs = vec![
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = vec![1.0, -1.0, -1.0, 1.0];
    (xs, ys)
}
