use crate::error::NeuraGradError;
use crate::tape::Tape;
use crate::value::Value;
use approx::relative_eq;
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(NeuraGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(NeuraGradError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
}

impl From<NeuraGradError> for GradCheckError {
    fn from(err: NeuraGradError) -> Self {
        GradCheckError::ForwardPassError(err)
    }
}

/// Evaluates `func` on a fresh tape whose leaves hold `inputs`.
fn evaluate<F>(func: &F, inputs: &[f64]) -> Result<(Vec<Value>, Value), GradCheckError>
where
    F: Fn(&[Value]) -> Result<Value, NeuraGradError>,
{
    let tape = Tape::new();
    let leaves: Vec<Value> = inputs.iter().map(|&x| tape.leaf(x)).collect();
    let output = func(&leaves).map_err(GradCheckError::ForwardPassError)?;
    Ok((leaves, output))
}

/// Checks analytical gradients against numerical gradients using central finite
/// differences.
///
/// `func` maps leaf values to a scalar output. Each input `x_i` is perturbed by
/// `±epsilon` on a fresh tape and `(f(x + e) - f(x - e)) / 2e` is compared with the
/// gradient that `backward()` accumulates on the corresponding leaf. Two gradients agree
/// when they are within `tolerance` either absolutely or relatively.
///
/// # Arguments
/// * `func`: Closure building the graph from the leaves.
/// * `inputs`: Point at which the gradient is checked.
/// * `epsilon`: Finite-difference step.
/// * `tolerance`: Accepted absolute/relative difference.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Value]) -> Result<Value, NeuraGradError>,
{
    // --- Analytical pass ---
    let (leaves, output) = evaluate(&func, inputs)?;
    output.backward().map_err(GradCheckError::BackwardPassError)?;
    let analytical: Vec<f64> = leaves
        .iter()
        .map(|leaf| leaf.try_grad())
        .collect::<Result<_, _>>()
        .map_err(GradCheckError::BackwardPassError)?;

    // --- Numerical pass, one input at a time ---
    for (i, &analytical_grad) in analytical.iter().enumerate() {
        let mut plus = inputs.to_vec();
        plus[i] += epsilon;
        let loss_plus = evaluate(&func, &plus)?.1.try_data()?;

        let mut minus = inputs.to_vec();
        minus[i] -= epsilon;
        let loss_minus = evaluate(&func, &minus)?.1.try_data()?;

        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                loss_plus,
                loss_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        debug!(
            "grad_check input {}: analytical {} numerical {}",
            i, analytical_grad, numerical_grad
        );
        if !relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = tolerance,
            max_relative = tolerance
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    Ok(())
}
