//! The user-facing scalar handle.

mod accessors;
mod autograd_methods;

use crate::error::NeuraGradError;
use crate::tape::{NodeId, Tape};
use std::fmt;

/// A scalar node in a [`Tape`].
///
/// `Value` is a lightweight handle (tape handle + [`NodeId`]). Cloning it never copies
/// the node: every clone observes the same value and the same gradient. Arithmetic on
/// values records new nodes on their tape; see [`crate::ops`] for the fallible forms and
/// the operator overloads.
#[derive(Clone)]
pub struct Value {
    tape: Tape,
    id: NodeId,
}

impl Value {
    pub(crate) fn new(tape: Tape, id: NodeId) -> Self {
        Value { tape, id }
    }

    /// Identity of the node on its tape.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tape this value was recorded on.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// `true` if both handles refer to the same node (identity, not value).
    pub fn is_same(&self, other: &Value) -> bool {
        self.id == other.id && self.tape.same_tape(&other.tape)
    }
}

/// Unwraps the result of an infallible-looking API.
///
/// Used by the operator overloads and plain accessors, where a stale or foreign handle is
/// a programming error and must abort the current step.
pub(crate) fn or_panic<T>(result: Result<T, NeuraGradError>) -> T {
    result.unwrap_or_else(|e| panic!("{}", e))
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.tape.borrow();
        match inner.node(self.id) {
            Ok(node) => f
                .debug_struct("Value")
                .field("id", &self.id)
                .field("data", &node.value)
                .field("grad", &node.grad)
                .field("op", &node.op)
                .field("label", &node.label)
                .finish(),
            Err(_) => f
                .debug_struct("Value")
                .field("id", &self.id)
                .field("stale", &true)
                .finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.tape.borrow();
        match inner.node(self.id) {
            Ok(node) => write!(
                f,
                "Value(data={:.16}, grad={:.16}, label={})",
                node.value,
                node.grad,
                node.label.as_deref().unwrap_or("")
            ),
            Err(e) => write!(f, "Value(<{}>)", e),
        }
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
