use crate::error::NeuraGradError;
use crate::ops::{leaky_relu_op, relu_op, swish_op, tanh_op};
use crate::value::Value;
use std::fmt;

/// Nonlinearity applied at the output of a nonlinear [`Neuron`](crate::nn::Neuron).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    Tanh,
    Relu,
    #[default]
    LeakyRelu,
    Swish,
}

impl Activation {
    /// Records the activation of `x` on its tape.
    pub fn apply(&self, x: &Value) -> Result<Value, NeuraGradError> {
        match self {
            Activation::Tanh => tanh_op(x),
            Activation::Relu => relu_op(x),
            Activation::LeakyRelu => leaky_relu_op(x),
            Activation::Swish => swish_op(x),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Activation::Tanh => "tanh",
            Activation::Relu => "relu",
            Activation::LeakyRelu => "leaky_relu",
            Activation::Swish => "swish",
        };
        f.write_str(name)
    }
}
