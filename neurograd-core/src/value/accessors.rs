use super::{or_panic, Value};
use crate::autograd::backward_op::Op;
use crate::error::NeuraGradError;

impl Value {
    /// Forward value of the node.
    pub fn try_data(&self) -> Result<f64, NeuraGradError> {
        Ok(self.tape.borrow().node(self.id)?.value)
    }

    /// Gradient accumulated on the node so far.
    pub fn try_grad(&self) -> Result<f64, NeuraGradError> {
        Ok(self.tape.borrow().node(self.id)?.grad)
    }

    /// Forward value of the node.
    ///
    /// # Panics
    /// If the handle is stale (its tape has been reset since it was created).
    pub fn data(&self) -> f64 {
        or_panic(self.try_data())
    }

    /// Gradient accumulated on the node so far.
    ///
    /// # Panics
    /// If the handle is stale.
    pub fn grad(&self) -> f64 {
        or_panic(self.try_grad())
    }

    pub fn op(&self) -> Op {
        or_panic(self.tape.borrow().node(self.id).map(|n| n.op))
    }

    pub fn label(&self) -> Option<String> {
        or_panic(self.tape.borrow().node(self.id).map(|n| n.label.clone()))
    }

    /// Attaches a diagnostic label. Labels never affect computation.
    pub fn set_label(&self, label: impl Into<String>) -> Result<(), NeuraGradError> {
        self.tape.borrow_mut().node_mut(self.id)?.label = Some(label.into());
        Ok(())
    }

    /// Handles to the node's operands, operand 0 first.
    pub fn operands(&self) -> Result<Vec<Value>, NeuraGradError> {
        let inner = self.tape.borrow();
        let node = inner.node(self.id)?;
        Ok(node
            .operands
            .iter()
            .flatten()
            .map(|id| Value::new(self.tape.clone(), *id))
            .collect())
    }

    pub fn is_leaf(&self) -> bool {
        self.op() == Op::Leaf
    }

    pub fn is_parameter(&self) -> bool {
        self.id.is_parameter()
    }

    /// Overwrites the value of a trainable parameter.
    ///
    /// This is the hook a training driver uses for its update rule
    /// (`p.set_value(p.data() - lr * p.grad())`). Computed nodes are immutable.
    ///
    /// # Errors
    /// `NotAParameter` if the node is not in the parameter region.
    pub fn set_value(&self, value: f64) -> Result<(), NeuraGradError> {
        if !self.is_parameter() {
            return Err(NeuraGradError::NotAParameter {
                operation: "set_value".to_string(),
            });
        }
        self.tape.borrow_mut().node_mut(self.id)?.value = value;
        Ok(())
    }

    /// Resets this node's gradient to exactly `0.0`.
    pub fn zero_grad(&self) -> Result<(), NeuraGradError> {
        self.tape.borrow_mut().node_mut(self.id)?.grad = 0.0;
        Ok(())
    }
}
