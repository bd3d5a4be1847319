use crate::error::NeuraGradError;
use crate::ops::arithmetic::{powf_op, sub_op};
use crate::ops::reduction::{mean_op, sum_op};
use crate::value::Value;
use std::str::FromStr;

/// Specifies the reduction to apply to the squared errors: `'mean' | 'sum'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

impl FromStr for Reduction {
    type Err = NeuraGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            _ => Err(NeuraGradError::InvalidConfiguration(format!(
                "Unsupported reduction type: {}",
                s
            ))),
        }
    }
}

/// Computes the Mean Squared Error (MSE) loss between predictions and targets.
///
/// The loss is recorded on the predictions' tape as ordinary nodes, so calling
/// `backward()` on it propagates into every parameter that produced the predictions.
/// Targets are constants and receive no gradient.
///
/// # Fields
/// * `reduction`: Specifies the type of reduction to apply to the output: `Mean` or `Sum`.
///   `Sum` is the plain `Σ (y - t)²` used by the classic training loop.
#[derive(Debug, Clone, Default)]
pub struct MSELoss {
    reduction: Reduction,
}

impl MSELoss {
    /// Creates a new `MSELoss`.
    ///
    /// # Arguments
    /// * `reduction`: The reduction method to apply (`Mean` or `Sum`).
    pub fn new(reduction: Reduction) -> Self {
        MSELoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Records the loss of `predictions` against `targets`.
    ///
    /// # Errors
    /// * `InvalidShape` if the lengths differ or `predictions` is empty.
    /// * Any error of the underlying ops (stale or foreign predictions).
    pub fn calculate(&self, predictions: &[Value], targets: &[f64]) -> Result<Value, NeuraGradError> {
        if predictions.len() != targets.len() {
            return Err(NeuraGradError::InvalidShape {
                expected: targets.len(),
                actual: predictions.len(),
                operation: "MSELoss calculate".to_string(),
            });
        }

        let squared_errors = predictions
            .iter()
            .zip(targets)
            .map(|(y, &t)| {
                let target = y.tape().leaf(t);
                let diff = sub_op(y, &target)?;
                powf_op(&diff, 2.0)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // sum_op/mean_op reject an empty slice
        match self.reduction {
            Reduction::Mean => mean_op(&squared_errors),
            Reduction::Sum => sum_op(&squared_errors),
        }
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
