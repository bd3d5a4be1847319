use super::arithmetic::{add_op, div_op};
use crate::error::NeuraGradError;
use crate::value::Value;

/// Sums `values` as a left-to-right chain of `add` nodes.
///
/// # Errors
/// `InvalidShape` if `values` is empty, since there is no tape to put a zero on.
pub fn sum_op(values: &[Value]) -> Result<Value, NeuraGradError> {
    let (first, rest) = values.split_first().ok_or_else(|| NeuraGradError::InvalidShape {
        expected: 1,
        actual: 0,
        operation: "sum_op".to_string(),
    })?;
    rest.iter()
        .try_fold(first.clone(), |acc, value| add_op(&acc, value))
}

/// Arithmetic mean of `values`: `sum_op(values) / n`.
pub fn mean_op(values: &[Value]) -> Result<Value, NeuraGradError> {
    let sum = sum_op(values)?;
    let count = sum.tape().leaf(values.len() as f64);
    div_op(&sum, &count)
}
