// Operator overloads and method forms of the scalar ops.
//
// These are the ergonomic surface: they panic where the `_op` functions return an error
// (stale handle, operands from different tapes). Plain `f64` operands are recorded as
// constant leaves on the other operand's tape.

use super::activation::{leaky_relu_op, relu_op, swish_op};
use super::arithmetic::{add_op, div_op, inv_op, mul_op, neg_op, pow_op, powf_op, sub_op};
use super::math_elem::{exp_op, tanh_op};
use crate::value::{or_panic, Value};
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op_fn:ident) => {
        impl $trait<&Value> for &Value {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                or_panic($op_fn(self, rhs))
            }
        }

        impl $trait<Value> for &Value {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                or_panic($op_fn(self, &rhs))
            }
        }

        impl $trait<&Value> for Value {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                or_panic($op_fn(&self, rhs))
            }
        }

        impl $trait<Value> for Value {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                or_panic($op_fn(&self, &rhs))
            }
        }

        impl $trait<f64> for &Value {
            type Output = Value;
            fn $method(self, rhs: f64) -> Value {
                let rhs = self.tape().leaf(rhs);
                or_panic($op_fn(self, &rhs))
            }
        }

        impl $trait<f64> for Value {
            type Output = Value;
            fn $method(self, rhs: f64) -> Value {
                (&self).$method(rhs)
            }
        }

        impl $trait<&Value> for f64 {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                let lhs = rhs.tape().leaf(self);
                or_panic($op_fn(&lhs, rhs))
            }
        }

        impl $trait<Value> for f64 {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                self.$method(&rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add_op);
impl_binary_op!(Sub, sub, sub_op);
impl_binary_op!(Mul, mul, mul_op);
impl_binary_op!(Div, div, div_op);

impl Neg for &Value {
    type Output = Value;
    fn neg(self) -> Value {
        or_panic(neg_op(self))
    }
}

impl Neg for Value {
    type Output = Value;
    fn neg(self) -> Value {
        -&self
    }
}

impl Value {
    /// `self ^ exponent`; the exponent is not differentiated.
    pub fn pow(&self, exponent: &Value) -> Value {
        or_panic(pow_op(self, exponent))
    }

    /// `self ^ exponent` with a constant exponent.
    pub fn powf(&self, exponent: f64) -> Value {
        or_panic(powf_op(self, exponent))
    }

    /// `1 / self`
    pub fn inv(&self) -> Value {
        or_panic(inv_op(self))
    }

    pub fn exp(&self) -> Value {
        or_panic(exp_op(self))
    }

    pub fn tanh(&self) -> Value {
        or_panic(tanh_op(self))
    }

    pub fn relu(&self) -> Value {
        or_panic(relu_op(self))
    }

    pub fn leaky_relu(&self) -> Value {
        or_panic(leaky_relu_op(self))
    }

    pub fn swish(&self) -> Value {
        or_panic(swish_op(self))
    }
}
