//! # Scalar Operations Module (`ops`)
//!
//! The graph builder. Every operation evaluates its forward value eagerly and appends one
//! node to the operands' [`Tape`](crate::Tape), recording the operation tag and the
//! operand ids. The matching gradient rule lives in
//! [`autograd::backward_op`](crate::autograd::backward_op).
//!
//! ## Structure:
//!
//! - **`_op` Functions:** fallible entry points (`add_op`, `tanh_op`, ...) returning
//!   `Result<Value, NeuraGradError>`. They fail fast when an operand is stale or belongs to
//!   another tape.
//! - **Overloads (`ops::overloads`):** `+ - * /` and unary `-` on `Value`/`&Value`/`f64`,
//!   plus methods such as [`Value::tanh`]. These panic on the same errors.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: add, sub, mul, div, pow, neg, inv.
//! - [`math_elem`]: exp, tanh.
//! - [`activation`]: relu, leaky relu, swish.
//! - [`reduction`]: sum and mean over a slice of values.

pub mod activation;
pub mod arithmetic;
pub mod math_elem;
mod overloads;
pub mod reduction;

pub use activation::{leaky_relu_op, relu_op, swish_op};
pub use arithmetic::{add_op, div_op, inv_op, mul_op, neg_op, pow_op, powf_op, sub_op};
pub use math_elem::{exp_op, tanh_op};
pub use reduction::{mean_op, sum_op};

use crate::autograd::backward_op::Op;
use crate::error::NeuraGradError;
use crate::value::Value;

/// Records a unary operation on `a`'s tape.
pub(crate) fn apply_unary_op(a: &Value, op: Op) -> Result<Value, NeuraGradError> {
    a.tape().record(op, &[a])
}

/// Records a binary operation on `a`'s tape. `b` must live on the same tape.
pub(crate) fn apply_binary_op(a: &Value, b: &Value, op: Op) -> Result<Value, NeuraGradError> {
    a.tape().record(op, &[a, b])
}
