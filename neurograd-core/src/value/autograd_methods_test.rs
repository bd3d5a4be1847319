use crate::autograd::Op;
use crate::error::NeuraGradError;
use crate::tape::Tape;
use approx::assert_relative_eq;

#[test]
fn test_backward_on_leaf_only_seeds_itself() -> Result<(), NeuraGradError> {
    let tape = Tape::new();
    let x = tape.leaf(3.0);
    let other = tape.leaf(4.0);
    x.backward()?;
    assert_eq!(x.grad(), 1.0);
    assert_eq!(other.grad(), 0.0);
    Ok(())
}

#[test]
fn test_second_backward_accumulates() -> Result<(), NeuraGradError> {
    let tape = Tape::new();
    let x = tape.leaf(3.0);
    let y = &x * 2.0;
    y.backward()?;
    assert_eq!(x.grad(), 2.0);
    y.backward()?;
    // root is re-seeded to 1, the leaf keeps accumulating
    assert_eq!(y.grad(), 1.0);
    assert_eq!(x.grad(), 4.0);
    Ok(())
}

#[test]
fn test_shared_intermediate_is_fully_accumulated_before_propagating() -> Result<(), NeuraGradError> {
    let tape = Tape::new();
    let x = tape.leaf(1.5);
    let h = &x * &x; // used twice below
    let y = &h * 3.0 + h.exp();
    y.backward()?;
    let expected_h = 3.0 + (1.5_f64 * 1.5).exp();
    assert_relative_eq!(h.grad(), expected_h, epsilon = 1e-12);
    assert_relative_eq!(x.grad(), expected_h * 2.0 * 1.5, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_backward_is_deterministic() -> Result<(), NeuraGradError> {
    let run = || -> Result<Vec<u64>, NeuraGradError> {
        let tape = Tape::new();
        let a = tape.leaf(0.3);
        let b = tape.leaf(-1.1);
        let c = (&a * &b + a.tanh()).swish() / (&b - 2.0).exp();
        c.backward()?;
        Ok(vec![a.grad().to_bits(), b.grad().to_bits(), c.data().to_bits()])
    };
    assert_eq!(run()?, run()?);
    Ok(())
}

#[test]
fn test_backward_on_stale_root_fails() {
    let tape = Tape::new();
    let x = tape.leaf(1.0);
    let y = &x + 1.0;
    tape.reset();
    assert!(matches!(y.backward(), Err(NeuraGradError::StaleNode { .. })));
}

#[test]
fn test_order_is_cached_until_reset() -> Result<(), NeuraGradError> {
    let tape = Tape::new();
    let x = tape.leaf(2.0);
    let y = &x * &x;
    let first = y.topological_order()?;
    // nodes created later are not reachable from y and do not change its order
    let _z = &y + 1.0;
    assert_eq!(y.topological_order()?, first);
    Ok(())
}

#[test]
fn test_trace_exports_reachable_subgraph() -> Result<(), NeuraGradError> {
    let tape = Tape::new();
    let a = tape.labeled_leaf(2.0, "a");
    let b = tape.labeled_leaf(-3.0, "b");
    let _unrelated = tape.leaf(9.0);
    let c = &a * &b;
    c.set_label("c")?;
    c.backward()?;

    let records = c.trace()?;
    assert_eq!(records.len(), 3);
    let last = records.last().unwrap();
    assert_eq!(last.id, c.id());
    assert_eq!(last.op, Op::Mul);
    assert_eq!(last.label.as_deref(), Some("c"));
    assert_eq!(last.value, -6.0);
    assert_eq!(last.grad, 1.0);
    assert_eq!(last.operands, vec![a.id(), b.id()]);
    assert_eq!(records[0].grad, -3.0);
    assert_eq!(records[1].grad, 2.0);
    Ok(())
}

#[test]
fn test_display_format() {
    let tape = Tape::new();
    let x = tape.labeled_leaf(0.5, "x");
    assert_eq!(
        x.to_string(),
        "Value(data=0.5000000000000000, grad=0.0000000000000000, label=x)"
    );
}

// Short chain, derived by hand:
// c = 2(a + b), d = ab + b^3, e = c - d, g = e^2 / 2
// dg/da = e * (2 - b), dg/db = e * (2 - a - 3b^2)
#[test]
fn test_short_chain_gradients() -> Result<(), NeuraGradError> {
    let tape = Tape::new();
    let a = tape.leaf(-4.0);
    let b = tape.leaf(2.0);
    let c = &a + &b;
    let d = &a * &b + b.powf(3.0);
    let c = &c + &c;
    let e = &c - &d;
    let f = e.powf(2.0);
    let g = &f / 2.0;
    g.backward()?;

    assert_eq!(g.data(), 8.0);
    assert_relative_eq!(a.grad(), 0.0);
    assert_relative_eq!(b.grad(), 24.0);
    Ok(())
}
