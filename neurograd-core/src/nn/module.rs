use crate::error::NeuraGradError;
use crate::nn::Parameter;
use crate::tape::Tape;
use crate::value::{or_panic, Value};
use log::debug;

/// The base trait for all neural network modules (neurons, layers, networks).
///
/// This trait defines the fundamental operations that any module should support:
/// performing a forward pass and exposing its learnable parameters.
pub trait Module: std::fmt::Debug {
    /// Performs a forward pass of the module.
    ///
    /// # Arguments
    /// * `inputs`: One value per input feature, all recorded on the module's tape.
    ///
    /// # Returns
    /// The module's outputs, or a `NeuraGradError` if the inputs do not match the
    /// module's fan-in or belong to another tape.
    fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, NeuraGradError>;

    /// Returns all learnable parameters of the module, including those of sub-modules.
    ///
    /// The order is stable across calls; drivers rely on it to pair parameters with
    /// optimizer state.
    fn parameters(&self) -> Vec<&Parameter>;

    /// Returns all learnable parameters along with hierarchical dotted names
    /// (e.g. `"layers.1.neurons.0.weights.2"`).
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// The tape every parameter of this module lives on.
    fn tape(&self) -> &Tape;

    /// Returns the direct child modules.
    /// For modules that do not contain other modules, this is an empty vector.
    fn children(&self) -> Vec<&dyn Module> {
        Vec::new()
    }

    /// Sets every parameter gradient to exactly `0.0` and discards the intermediate nodes
    /// of the previous step (the tape moves to a new epoch).
    fn zero_grad(&self) {
        for param in self.parameters() {
            // parameter nodes are never stale
            or_panic(param.zero_grad());
        }
        self.tape().reset();
        debug!("zero_grad: cleared {} parameter gradients", self.num_parameters());
    }

    /// Number of scalar parameters.
    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Scale {
        tape: Tape,
        factor: Parameter,
    }

    impl Module for Scale {
        fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, NeuraGradError> {
            inputs
                .iter()
                .map(|x| crate::ops::mul_op(x, &self.factor))
                .collect()
        }

        fn parameters(&self) -> Vec<&Parameter> {
            vec![&self.factor]
        }

        fn named_parameters(&self) -> Vec<(String, &Parameter)> {
            vec![("factor".to_string(), &self.factor)]
        }

        fn tape(&self) -> &Tape {
            &self.tape
        }
    }

    #[test]
    fn test_provided_methods() -> Result<(), NeuraGradError> {
        let tape = Tape::new();
        let module = Scale {
            factor: Parameter::new(&tape, 3.0),
            tape: tape.clone(),
        };
        assert_eq!(module.num_parameters(), 1);
        assert!(module.children().is_empty());

        let x = tape.leaf(2.0);
        let out = module.forward(std::slice::from_ref(&x))?;
        assert_eq!(out[0].data(), 6.0);
        out[0].backward()?;
        assert_eq!(module.factor.grad(), 2.0);

        module.zero_grad();
        assert_eq!(module.factor.grad(), 0.0);
        assert!(tape.is_empty());
        assert!(x.try_data().is_err());
        Ok(())
    }
}
