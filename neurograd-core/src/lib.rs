//! Scalar reverse-mode automatic differentiation and a small neural-network library on top
//! of it.
//!
//! Every arithmetic operation on a [`Value`] records a node on a [`Tape`]; calling
//! [`Value::backward`] on a scalar result accumulates `∂result/∂node` into every node it
//! depends on. [`Neuron`], [`Layer`] and [`Mlp`] build on the engine and expose their
//! weights as [`Parameter`]s that survive [`Tape::reset`] between training steps.
//!
//! ```
//! use neurograd_core::Tape;
//!
//! let tape = Tape::new();
//! let x = tape.leaf(3.0);
//! let y = &x * &x + 2.0 * &x;
//! y.backward().unwrap();
//! assert_eq!(y.data(), 15.0);
//! assert_eq!(x.grad(), 8.0);
//! ```

pub mod autograd;
pub mod error;
pub mod model;
pub mod nn;
pub mod ops;
pub mod tape;
pub mod value;

pub use autograd::{NodeRecord, Op};
pub use error::NeuraGradError;
pub use model::Mlp;
pub use nn::{Activation, Layer, MSELoss, Module, Neuron, Parameter, Reduction};
pub use tape::{NodeId, Tape};
pub use value::Value;
