use crate::error::NeuraGradError;
use crate::nn::activation::Activation;
use crate::nn::init::{uniform_weights, zero_bias};
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::{add_op, mul_op};
use crate::tape::Tape;
use crate::value::Value;
use rand::Rng;

/// A single unit: `activation(Σ wᵢ·xᵢ + b)`.
///
/// Weights are drawn from `U(-1, 1)` and the bias starts at 0. A linear neuron
/// (`nonlinear = false`) skips the activation.
#[derive(Debug)]
pub struct Neuron {
    tape: Tape,
    bias: Parameter,
    weights: Vec<Parameter>,
    activation: Option<Activation>,
}

impl Neuron {
    /// Creates a neuron with `fan_in` randomly initialised weights.
    ///
    /// # Arguments
    /// * `tape` - The tape holding the neuron's parameters.
    /// * `fan_in` - Number of inputs.
    /// * `nonlinear` - If `true`, the default [`Activation`] is applied to the output.
    pub fn new(tape: &Tape, fan_in: usize, nonlinear: bool) -> Self {
        Self::with_rng(tape, fan_in, nonlinear, &mut rand::thread_rng())
    }

    /// Like [`Neuron::new`], drawing the weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        tape: &Tape,
        fan_in: usize,
        nonlinear: bool,
        rng: &mut R,
    ) -> Self {
        let weights = uniform_weights(rng, fan_in);
        let activation = nonlinear.then(Activation::default);
        Self::from_weights(tape, &weights, zero_bias(), activation)
    }

    /// Creates a neuron with fixed weights and bias.
    pub fn from_weights(
        tape: &Tape,
        weights: &[f64],
        bias: f64,
        activation: Option<Activation>,
    ) -> Self {
        Neuron {
            tape: tape.clone(),
            bias: Parameter::new(tape, bias),
            weights: weights.iter().map(|&w| Parameter::new(tape, w)).collect(),
            activation,
        }
    }

    /// Replaces the nonlinearity. A linear neuron stays linear.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        if self.activation.is_some() {
            self.activation = Some(activation);
        }
        self
    }

    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[Parameter] {
        &self.weights
    }

    pub fn bias(&self) -> &Parameter {
        &self.bias
    }

    /// The configured nonlinearity, `None` for a linear neuron.
    pub fn activation(&self) -> Option<Activation> {
        self.activation
    }

    /// Computes the neuron's single output for `inputs`.
    ///
    /// # Errors
    /// * `InvalidShape` if `inputs.len()` differs from the fan-in.
    /// * `ForeignNode` / `StaleNode` if an input is not live on the neuron's tape.
    pub fn call(&self, inputs: &[Value]) -> Result<Value, NeuraGradError> {
        if inputs.len() != self.fan_in() {
            return Err(NeuraGradError::InvalidShape {
                expected: self.fan_in(),
                actual: inputs.len(),
                operation: "Neuron::call".to_string(),
            });
        }

        let mut products = self
            .weights
            .iter()
            .zip(inputs)
            .map(|(w, x)| mul_op(w, x));
        let weighted_sum = match products.next() {
            Some(first) => {
                let dot = products.try_fold(first?, |acc, p| add_op(&acc, &p?))?;
                add_op(&dot, &self.bias)?
            }
            None => (*self.bias).clone(),
        };

        match self.activation {
            Some(activation) => activation.apply(&weighted_sum),
            None => Ok(weighted_sum),
        }
    }
}

impl Module for Neuron {
    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, NeuraGradError> {
        Ok(vec![self.call(inputs)?])
    }

    /// Bias first, then the weights in input order.
    fn parameters(&self) -> Vec<&Parameter> {
        std::iter::once(&self.bias).chain(&self.weights).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        std::iter::once(("bias".to_string(), &self.bias))
            .chain(
                self.weights
                    .iter()
                    .enumerate()
                    .map(|(i, w)| (format!("weights.{}", i), w)),
            )
            .collect()
    }

    fn tape(&self) -> &Tape {
        &self.tape
    }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;
