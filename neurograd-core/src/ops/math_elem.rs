use super::apply_unary_op;
use crate::autograd::backward_op::Op;
use crate::error::NeuraGradError;
use crate::value::Value;

/// `e^a`. The backward rule reuses the stored output, since d/dx e^x = e^x.
pub fn exp_op(a: &Value) -> Result<Value, NeuraGradError> {
    apply_unary_op(a, Op::Exp)
}

/// Hyperbolic tangent. The backward rule is `1 - tanh(x)^2`, read from the output.
pub fn tanh_op(a: &Value) -> Result<Value, NeuraGradError> {
    apply_unary_op(a, Op::Tanh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::grad_check::check_grad;
    use crate::tape::Tape;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_forward_backward() -> Result<(), NeuraGradError> {
        let tape = Tape::new();
        let x = tape.leaf(1.0);
        let y = exp_op(&x)?;
        y.backward()?;
        assert_relative_eq!(y.data(), std::f64::consts::E);
        assert_relative_eq!(x.grad(), std::f64::consts::E);
        Ok(())
    }

    #[test]
    fn test_tanh_forward_backward() -> Result<(), NeuraGradError> {
        let tape = Tape::new();
        let x = tape.leaf(0.5);
        let y = tanh_op(&x)?;
        y.backward()?;
        let t = 0.5_f64.tanh();
        assert_relative_eq!(y.data(), t);
        assert_relative_eq!(x.grad(), 1.0 - t * t);
        Ok(())
    }

    #[test]
    fn test_tanh_saturates_without_nan() -> Result<(), NeuraGradError> {
        let tape = Tape::new();
        let x = tape.leaf(50.0);
        let y = tanh_op(&x)?;
        y.backward()?;
        assert_eq!(y.data(), 1.0);
        assert_eq!(x.grad(), 0.0);
        Ok(())
    }

    #[test]
    fn test_grad_check_exp_and_tanh() {
        for x in [-2.0, -0.4, 0.0, 0.9, 1.8] {
            check_grad(|xs| exp_op(&xs[0]), &[x], 1e-6, 1e-6).unwrap();
            check_grad(|xs| tanh_op(&xs[0]), &[x], 1e-6, 1e-6).unwrap();
        }
    }
}
