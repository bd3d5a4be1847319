use super::Parameter;
use crate::tape::Tape;

#[test]
fn test_parameter_lives_in_parameter_region() {
    let tape = Tape::new();
    let param = Parameter::new(&tape, 0.75);
    assert!(param.is_parameter());
    assert!(param.is_leaf());
    assert_eq!(param.data(), 0.75);
    assert_eq!(tape.num_parameters(), 1);
    assert!(tape.is_empty());
}

#[test]
fn test_parameter_deref() {
    let tape = Tape::new();
    let param = Parameter::labeled(&tape, 2.0, "w");
    // Value methods and operators through Deref
    let y = &*param * 3.0;
    assert_eq!(y.data(), 6.0);
    assert_eq!(param.label().as_deref(), Some("w"));
}

#[test]
fn test_parameter_survives_reset() {
    let tape = Tape::new();
    let param = Parameter::new(&tape, 1.0);
    let y = (&*param * 4.0).tanh();
    y.backward().unwrap();
    tape.reset();
    assert_eq!(param.data(), 1.0);
    assert!(param.grad() != 0.0);
    tape.zero_grad();
    assert_eq!(param.grad(), 0.0);
}

#[test]
fn test_set_value_and_descend() {
    let tape = Tape::new();
    let param = Parameter::new(&tape, 1.0);
    param.set_value(0.5);
    assert_eq!(param.data(), 0.5);

    let loss = param.powf(2.0);
    loss.backward().unwrap();
    assert_eq!(param.grad(), 1.0);
    param.descend(0.1);
    assert_eq!(param.data(), 0.4);
}

#[test]
fn test_parameter_clone_shares_node() {
    let tape = Tape::new();
    let param = Parameter::new(&tape, 1.0);
    let clone = param.clone();
    clone.set_value(-2.0);
    assert_eq!(param.data(), -2.0);
    assert!(param.is_same(&clone.into_inner()));
}
