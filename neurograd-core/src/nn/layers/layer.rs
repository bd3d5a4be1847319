use crate::error::NeuraGradError;
use crate::nn::activation::Activation;
use crate::nn::layers::neuron::Neuron;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tape::Tape;
use crate::value::Value;
use rand::Rng;

/// A fully connected layer: `fan_out` neurons reading the same inputs.
#[derive(Debug)]
pub struct Layer {
    tape: Tape,
    fan_in: usize,
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates a layer of `fan_out` neurons, each with `fan_in` inputs.
    ///
    /// # Arguments
    /// * `tape` - The tape holding the layer's parameters.
    /// * `fan_in` - Number of inputs of every neuron.
    /// * `fan_out` - Number of neurons, i.e. outputs.
    /// * `nonlinear` - Passed to every neuron.
    pub fn new(tape: &Tape, fan_in: usize, fan_out: usize, nonlinear: bool) -> Self {
        Self::with_rng(tape, fan_in, fan_out, nonlinear, &mut rand::thread_rng())
    }

    /// Like [`Layer::new`], drawing the weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        tape: &Tape,
        fan_in: usize,
        fan_out: usize,
        nonlinear: bool,
        rng: &mut R,
    ) -> Self {
        let neurons = (0..fan_out)
            .map(|_| Neuron::with_rng(tape, fan_in, nonlinear, &mut *rng))
            .collect();
        Layer {
            tape: tape.clone(),
            fan_in,
            neurons,
        }
    }

    /// Assembles a layer from already built neurons.
    ///
    /// # Errors
    /// * `InvalidConfiguration` if `neurons` is empty.
    /// * `ForeignNode` if a neuron's parameters live on another tape.
    /// * `InvalidShape` if the neurons disagree on their fan-in.
    pub fn from_neurons(tape: &Tape, neurons: Vec<Neuron>) -> Result<Self, NeuraGradError> {
        let fan_in = neurons
            .first()
            .map(Neuron::fan_in)
            .ok_or_else(|| {
                NeuraGradError::InvalidConfiguration(
                    "a layer built from neurons needs at least one neuron".to_string(),
                )
            })?;
        for neuron in &neurons {
            if !neuron.tape().same_tape(tape) {
                return Err(NeuraGradError::ForeignNode {
                    operation: "Layer::from_neurons".to_string(),
                });
            }
            if neuron.fan_in() != fan_in {
                return Err(NeuraGradError::InvalidShape {
                    expected: fan_in,
                    actual: neuron.fan_in(),
                    operation: "Layer::from_neurons".to_string(),
                });
            }
        }
        Ok(Layer {
            tape: tape.clone(),
            fan_in,
            neurons,
        })
    }

    /// Sets the nonlinearity of every nonlinear neuron.
    pub fn with_activation(self, activation: Activation) -> Self {
        Layer {
            tape: self.tape,
            fan_in: self.fan_in,
            neurons: self
                .neurons
                .into_iter()
                .map(|n| n.with_activation(activation))
                .collect(),
        }
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn fan_in(&self) -> usize {
        self.fan_in
    }

    pub fn fan_out(&self) -> usize {
        self.neurons.len()
    }
}

impl Module for Layer {
    /// One output per neuron, in neuron order.
    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, NeuraGradError> {
        // checked here as well so a layer without neurons still rejects bad input
        if inputs.len() != self.fan_in {
            return Err(NeuraGradError::InvalidShape {
                expected: self.fan_in,
                actual: inputs.len(),
                operation: "Layer::forward".to_string(),
            });
        }
        self.neurons.iter().map(|n| n.call(inputs)).collect()
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.neurons
            .iter()
            .enumerate()
            .flat_map(|(i, n)| {
                n.named_parameters()
                    .into_iter()
                    .map(move |(name, p)| (format!("neurons.{}.{}", i, name), p))
            })
            .collect()
    }

    fn tape(&self) -> &Tape {
        &self.tape
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.neurons.iter().map(|n| n as &dyn Module).collect()
    }
}
