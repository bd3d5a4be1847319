//! Reverse-mode differentiation machinery: operation tags and their gradient rules,
//! topological ordering, finite-difference checking and trace export.

pub mod backward_op;
pub mod grad_check;
pub(crate) mod graph;
pub mod trace;

pub use backward_op::{Op, LEAKY_RELU_SLOPE};
pub use grad_check::{check_grad, GradCheckError};
pub use trace::NodeRecord;
