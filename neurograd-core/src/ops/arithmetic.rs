use super::{apply_binary_op, apply_unary_op};
use crate::autograd::backward_op::Op;
use crate::error::NeuraGradError;
use crate::value::Value;

/// `a + b`
pub fn add_op(a: &Value, b: &Value) -> Result<Value, NeuraGradError> {
    apply_binary_op(a, b, Op::Add)
}

/// `a - b`
pub fn sub_op(a: &Value, b: &Value) -> Result<Value, NeuraGradError> {
    apply_binary_op(a, b, Op::Sub)
}

/// `a * b`
pub fn mul_op(a: &Value, b: &Value) -> Result<Value, NeuraGradError> {
    apply_binary_op(a, b, Op::Mul)
}

/// `a / b`
///
/// Division by an exact zero is not an error: the result is `±inf` or `NaN`, exactly as
/// with `f64`, and propagates through the rest of the graph.
pub fn div_op(a: &Value, b: &Value) -> Result<Value, NeuraGradError> {
    apply_binary_op(a, b, Op::Div)
}

/// Raises `base` to the power `exponent`.
///
/// The exponent is recorded as operand 1 but is treated as a constant: the backward pass
/// only propagates into `base`. A negative base with a fractional exponent yields `NaN`.
pub fn pow_op(base: &Value, exponent: &Value) -> Result<Value, NeuraGradError> {
    apply_binary_op(base, exponent, Op::Pow)
}

/// Raises `base` to a constant power, recorded as a leaf on `base`'s tape.
pub fn powf_op(base: &Value, exponent: f64) -> Result<Value, NeuraGradError> {
    let exponent = base.tape().leaf(exponent);
    pow_op(base, &exponent)
}

/// `-a`
pub fn neg_op(a: &Value) -> Result<Value, NeuraGradError> {
    apply_unary_op(a, Op::Neg)
}

/// `1 / a`
pub fn inv_op(a: &Value) -> Result<Value, NeuraGradError> {
    apply_unary_op(a, Op::Inv)
}

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
