use thiserror::Error;

/// Custom error type for the neurograd engine.
///
/// Every variant describes a programming error detected at a call boundary. Undefined
/// arithmetic (division by zero, a negative base raised to a fractional power) is not an
/// error: it propagates IEEE infinity/NaN through the graph like native `f64` code does.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NeuraGradError {
    #[error("Shape mismatch: expected {expected} inputs, got {actual} during operation {operation}")]
    InvalidShape {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Stale node: index {index} was created in tape epoch {node_epoch}, but the tape is at epoch {tape_epoch}")]
    StaleNode {
        index: usize,
        node_epoch: u64,
        tape_epoch: u64,
    },

    #[error("Operands of '{operation}' belong to different tapes")]
    ForeignNode { operation: String },

    #[error("Node index {index} out of bounds for a tape region of length {len}")]
    NodeOutOfBounds { index: usize, len: usize },

    #[error("Operation '{operation}' requires a trainable parameter")]
    NotAParameter { operation: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
