use super::apply_unary_op;
use crate::autograd::backward_op::Op;
use crate::error::NeuraGradError;
use crate::value::Value;

/// Rectified linear unit: `max(0, a)`.
///
/// The gradient is gated on the input: it passes through when `a > 0` and is `0`
/// otherwise, including at exactly `0`.
pub fn relu_op(a: &Value) -> Result<Value, NeuraGradError> {
    apply_unary_op(a, Op::Relu)
}

/// Leaky ReLU: `a` if `a > 0`, else `0.01 * a`.
pub fn leaky_relu_op(a: &Value) -> Result<Value, NeuraGradError> {
    apply_unary_op(a, Op::LeakyRelu)
}

/// Swish: `a * sigmoid(a)`.
pub fn swish_op(a: &Value) -> Result<Value, NeuraGradError> {
    apply_unary_op(a, Op::Swish)
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
