// Operation tags and their forward/backward rules.

use std::fmt;

/// Negative-side slope of the leaky ReLU.
pub const LEAKY_RELU_SLOPE: f64 = 0.01;

/// Identifies the rule that produced a node.
///
/// Every non-leaf node stores exactly one `Op`. The backward pass does not capture any
/// closure: it dispatches on this tag through [`local_gradients`], reading only the node's
/// own output, its accumulated gradient and the values of its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Input, constant or parameter. Has no operands.
    Leaf,
    Add,
    Sub,
    Mul,
    Div,
    /// `operand0 ^ operand1`. Only the base receives a gradient.
    Pow,
    Neg,
    Inv,
    Exp,
    Tanh,
    Relu,
    LeakyRelu,
    Swish,
}

impl Op {
    /// Number of operands a node built by this op references.
    pub fn arity(self) -> usize {
        match self {
            Op::Leaf => 0,
            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Pow => 2,
            Op::Neg | Op::Inv | Op::Exp | Op::Tanh | Op::Relu | Op::LeakyRelu | Op::Swish => 1,
        }
    }

    /// Short tag used in traces and diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Leaf => "leaf",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "^",
            Op::Neg => "neg",
            Op::Inv => "inv",
            Op::Exp => "exp",
            Op::Tanh => "tanh",
            Op::Relu => "relu",
            Op::LeakyRelu => "lrelu",
            Op::Swish => "swish",
        }
    }

    /// Evaluates the forward rule. `rhs` is ignored by unary ops.
    pub(crate) fn forward(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Leaf => lhs,
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => lhs / rhs,
            Op::Pow => lhs.powf(rhs),
            Op::Neg => -lhs,
            Op::Inv => 1.0 / lhs,
            Op::Exp => lhs.exp(),
            Op::Tanh => lhs.tanh(),
            Op::Relu => {
                if lhs > 0.0 {
                    lhs
                } else {
                    0.0
                }
            }
            Op::LeakyRelu => {
                if lhs > 0.0 {
                    lhs
                } else {
                    LEAKY_RELU_SLOPE * lhs
                }
            }
            Op::Swish => lhs * sigmoid(lhs),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// What a backward rule may read about the node being processed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BackwardContext {
    /// Gradient accumulated on the node itself (dL/dOutput).
    pub upstream: f64,
    /// The node's forward value.
    pub output: f64,
    /// Value of operand 0.
    pub lhs: f64,
    /// Value of operand 1, `0.0` for unary ops.
    pub rhs: f64,
}

/// Computes the contribution the node passes to each of its operands.
///
/// The returned contributions are *added* to the operand gradients by the caller; `None`
/// means the operand receives nothing (missing operand, or the non-differentiated
/// exponent of `Pow`).
pub(crate) fn local_gradients(op: Op, ctx: &BackwardContext) -> [Option<f64>; 2] {
    let g = ctx.upstream;
    match op {
        Op::Leaf => [None, None],
        Op::Add => [Some(g), Some(g)],
        Op::Sub => [Some(g), Some(-g)],
        Op::Mul => [Some(g * ctx.rhs), Some(g * ctx.lhs)],
        Op::Div => [Some(g / ctx.rhs), Some(-g * ctx.lhs / (ctx.rhs * ctx.rhs))],
        Op::Pow => [Some(g * ctx.rhs * ctx.lhs.powf(ctx.rhs - 1.0)), None],
        Op::Neg => [Some(-g), None],
        Op::Inv => [Some(-g / (ctx.lhs * ctx.lhs)), None],
        Op::Exp => [Some(g * ctx.output), None],
        Op::Tanh => [Some(g * (1.0 - ctx.output * ctx.output)), None],
        Op::Relu => [Some(if ctx.lhs > 0.0 { g } else { 0.0 }), None],
        Op::LeakyRelu => [
            Some(if ctx.lhs > 0.0 { g } else { LEAKY_RELU_SLOPE * g }),
            None,
        ],
        Op::Swish => [Some(g * swish_derivative(ctx.lhs, ctx.output)), None],
    }
}

/// d/dx [x * sigmoid(x)] = f(x) + sigmoid(x) * (1 - f(x))
#[cfg(not(feature = "legacy-swish"))]
fn swish_derivative(x: f64, output: f64) -> f64 {
    output + sigmoid(x) * (1.0 - output)
}

// Legacy rule `f(x) + sigmoid(x) * (1 + f(x))`; not the analytic derivative.
#[cfg(feature = "legacy-swish")]
fn swish_derivative(x: f64, output: f64) -> f64 {
    output + sigmoid(x) * (1.0 + output)
}
