mod common;

use approx::assert_relative_eq;
use common::{init_logger, leaves};
use neurograd_core::{Activation, Module, NeuraGradError, Neuron, Tape};

// The classic worked example, with rebinding standing in for in-place updates.
#[test]
fn test_classic_expression_gradients() -> Result<(), NeuraGradError> {
    init_logger();
    let tape = Tape::new();
    let a = tape.labeled_leaf(-4.0, "a");
    let b = tape.labeled_leaf(2.0, "b");

    let c = &a + &b;
    let d = &a * &b + b.powf(3.0);
    let c = &c + (&c + 1.0);
    let c = &c + (1.0 + &c + (-&a));
    let d = &d + (&d * 2.0 + (&b + &a).relu());
    let d = &d + (3.0 * &d + (&b - &a).relu());
    let e = &c - &d;
    let f = e.powf(2.0);
    let g = &f / 2.0;
    let g = &g + (10.0 / &f);
    g.backward()?;

    assert_relative_eq!(g.data(), 24.70408163265306, epsilon = 1e-12);
    assert_relative_eq!(a.grad(), 138.83381924198252, epsilon = 1e-9);
    assert_relative_eq!(b.grad(), 645.5772594752186, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_tanh_neuron_gradients() -> Result<(), NeuraGradError> {
    init_logger();
    let tape = Tape::new();
    let neuron = Neuron::from_weights(
        &tape,
        &[-3.0, 1.0],
        6.8813735870195432,
        Some(Activation::Tanh),
    );
    let x = leaves(&tape, &[2.0, 0.0]);
    let out = neuron.forward(&x)?;
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0].data(), 0.7071067811865476, epsilon = 1e-12);

    out[0].backward()?;
    let grads: Vec<f64> = neuron.parameters().iter().map(|p| p.grad()).collect();
    // bias, w0, w1
    assert_relative_eq!(grads[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(grads[1], 1.0, epsilon = 1e-12);
    assert_relative_eq!(grads[2], 0.0);
    assert_relative_eq!(x[0].grad(), -1.5, epsilon = 1e-12);
    assert_relative_eq!(x[1].grad(), 0.5, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_trace_of_neuron_is_topologically_ordered() -> Result<(), NeuraGradError> {
    let tape = Tape::new();
    let neuron = Neuron::from_weights(&tape, &[0.5, -0.5], 0.1, Some(Activation::Tanh));
    let out = neuron.call(&leaves(&tape, &[1.0, 2.0]))?;
    let records = out.trace()?;

    // w0, x0, w0*x0, w1, x1, w1*x1, sum, bias, +bias, tanh
    assert_eq!(records.len(), 10);
    for (pos, record) in records.iter().enumerate() {
        for operand in &record.operands {
            let operand_pos = records.iter().position(|r| r.id == *operand).unwrap();
            assert!(operand_pos < pos);
        }
    }
    assert_eq!(records.last().unwrap().id, out.id());
    Ok(())
}

#[test]
fn test_stale_and_foreign_handles_fail_fast() {
    let tape = Tape::new();
    let neuron = Neuron::new(&tape, 2, true);
    let x = leaves(&tape, &[1.0, 2.0]);
    neuron.zero_grad();
    assert!(matches!(
        neuron.call(&x),
        Err(NeuraGradError::StaleNode { .. })
    ));

    let other = Tape::new();
    assert!(matches!(
        neuron.call(&leaves(&other, &[1.0, 2.0])),
        Err(NeuraGradError::ForeignNode { .. })
    ));
}
