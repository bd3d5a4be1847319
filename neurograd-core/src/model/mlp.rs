use crate::error::NeuraGradError;
use crate::nn::activation::Activation;
use crate::nn::layers::Layer;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tape::Tape;
use crate::value::Value;
use log::debug;
use rand::Rng;

/// A multi-layer perceptron: a chain of fully connected [`Layer`]s.
///
/// Every layer but the last is nonlinear; the last one is linear so the network can
/// produce unbounded outputs.
#[derive(Debug)]
pub struct Mlp {
    tape: Tape,
    layers: Vec<Layer>,
}

impl Mlp {
    /// Creates a network with `fan_in` inputs and one layer per entry of `layer_sizes`.
    ///
    /// # Arguments
    /// * `tape` - The tape holding every parameter of the network.
    /// * `fan_in` - Number of input features.
    /// * `layer_sizes` - Width of each layer, the last entry being the output count.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `layer_sizes` is empty.
    pub fn new(tape: &Tape, fan_in: usize, layer_sizes: &[usize]) -> Result<Self, NeuraGradError> {
        Self::with_rng(tape, fan_in, layer_sizes, &mut rand::thread_rng())
    }

    /// Like [`Mlp::new`], drawing the weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        tape: &Tape,
        fan_in: usize,
        layer_sizes: &[usize],
        rng: &mut R,
    ) -> Result<Self, NeuraGradError> {
        if layer_sizes.is_empty() {
            return Err(NeuraGradError::InvalidConfiguration(
                "an MLP needs at least one layer".to_string(),
            ));
        }

        let last = layer_sizes.len() - 1;
        let mut widths = Vec::with_capacity(layer_sizes.len() + 1);
        widths.push(fan_in);
        widths.extend_from_slice(layer_sizes);
        let layers: Vec<Layer> = widths
            .windows(2)
            .enumerate()
            .map(|(i, w)| Layer::with_rng(tape, w[0], w[1], i != last, &mut *rng))
            .collect();

        let mlp = Mlp {
            tape: tape.clone(),
            layers,
        };
        debug!(
            "Built MLP {} -> {:?} with {} parameters",
            fan_in,
            layer_sizes,
            mlp.num_parameters()
        );
        Ok(mlp)
    }

    /// Sets the nonlinearity of every hidden layer.
    pub fn with_activation(self, activation: Activation) -> Self {
        Mlp {
            tape: self.tape,
            layers: self
                .layers
                .into_iter()
                .map(|l| l.with_activation(activation))
                .collect(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Records `inputs` as leaves on the network's tape and runs the forward pass.
    pub fn predict(&self, inputs: &[f64]) -> Result<Vec<Value>, NeuraGradError> {
        let leaves: Vec<Value> = inputs.iter().map(|&x| self.tape.leaf(x)).collect();
        self.forward(&leaves)
    }
}

impl Module for Mlp {
    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, NeuraGradError> {
        self.layers
            .iter()
            .try_fold(inputs.to_vec(), |acts, layer| layer.forward(&acts))
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(i, l)| {
                l.named_parameters()
                    .into_iter()
                    .map(move |(name, p)| (format!("layers.{}.{}", i, name), p))
            })
            .collect()
    }

    fn tape(&self) -> &Tape {
        &self.tape
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.layers.iter().map(|l| l as &dyn Module).collect()
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
