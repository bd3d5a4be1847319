use crate::tape::Tape;
use crate::value::{or_panic, Value};
use std::fmt;
use std::ops::Deref;

/// A wrapper around a [`Value`] indicating it is a learnable parameter of a Module.
///
/// The underlying node lives in the tape's parameter region, so it survives
/// [`Tape::reset`] and keeps its value across training steps.
#[derive(Clone)]
pub struct Parameter(Value);

impl Parameter {
    /// Allocates a new trainable node on `tape` holding `value`.
    pub fn new(tape: &Tape, value: f64) -> Self {
        Parameter(tape.parameter(value))
    }

    /// Allocates a new trainable node carrying a diagnostic label.
    pub fn labeled(tape: &Tape, value: f64, label: impl Into<String>) -> Self {
        Parameter(tape.labeled_parameter(value, label))
    }

    /// Overwrites the parameter's value. This is the update hook for training drivers.
    pub fn set_value(&self, value: f64) {
        // parameter nodes are never stale, the only failure mode of set_value
        or_panic(self.0.set_value(value))
    }

    /// One gradient-descent step: `value -= learning_rate * grad`.
    pub fn descend(&self, learning_rate: f64) {
        self.set_value(self.data() - learning_rate * self.grad());
    }

    /// Consumes the Parameter and returns the underlying handle.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

// Allow using a Parameter wherever a `&Value` is expected.
impl Deref for Parameter {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Value> for Parameter {
    fn as_ref(&self) -> &Value {
        &self.0
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({:?})", self.0)
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
