use super::Value;
use crate::autograd::backward_op::{local_gradients, BackwardContext};
use crate::autograd::trace::NodeRecord;
use crate::error::NeuraGradError;
use crate::tape::NodeId;
use log::{debug, trace};

impl Value {
    /// Performs the backward pass starting from this value.
    ///
    /// Seeds `self.grad = 1` (dR/dR), then walks the topological order of the reachable
    /// graph from the root down to the leaves. Each node adds its local contribution,
    /// chosen by its [`crate::autograd::Op`], to the gradients of its operands. The order
    /// is computed on the first call for a given root and cached on the tape until the
    /// next reset.
    ///
    /// Gradients accumulate: calling `backward()` twice without an intervening
    /// `zero_grad()` adds the second pass on top of the first. Calling it on a leaf only
    /// sets the leaf's own gradient to 1.
    ///
    /// # Errors
    /// `StaleNode` if this handle, or any node reachable from it, was discarded.
    pub fn backward(&self) -> Result<(), NeuraGradError> {
        let mut inner = self.tape.borrow_mut();
        let order = inner.topological_order(self.id)?;
        debug!("Backward from {} over {} nodes", self.id, order.len());

        inner.node_mut(self.id)?.grad = 1.0;

        for &id in order.iter().rev() {
            let node = inner.node(id)?;
            let [lhs_id, rhs_id] = node.operands;
            let lhs_id = match lhs_id {
                Some(lhs) => lhs,
                None => continue, // leaf
            };
            let ctx = BackwardContext {
                upstream: node.grad,
                output: node.value,
                lhs: inner.node(lhs_id)?.value,
                rhs: match rhs_id {
                    Some(rhs) => inner.node(rhs)?.value,
                    None => 0.0,
                },
            };
            let op = node.op;
            let contributions = local_gradients(op, &ctx);
            trace!("{} ({}) upstream {} -> {:?}", id, op, ctx.upstream, contributions);

            for (operand, contribution) in [lhs_id].into_iter().chain(rhs_id).zip(contributions) {
                if let Some(delta) = contribution {
                    inner.node_mut(operand)?.grad += delta;
                }
            }
        }
        Ok(())
    }

    /// Topological order of the graph reachable from this value (operands first, this
    /// value last).
    pub fn topological_order(&self) -> Result<Vec<NodeId>, NeuraGradError> {
        let order = self.tape.borrow_mut().topological_order(self.id)?;
        Ok(order.to_vec())
    }

    /// Record stream of the reachable graph, in topological order.
    pub fn trace(&self) -> Result<Vec<NodeRecord>, NeuraGradError> {
        let mut inner = self.tape.borrow_mut();
        let order = inner.topological_order(self.id)?;
        order
            .iter()
            .map(|&id| inner.node(id).map(|node| NodeRecord::new(id, node)))
            .collect()
    }
}
