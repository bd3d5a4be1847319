//! Arena that owns every node of a computation graph.
//!
//! Nodes live in two regions. The *parameter* region holds trainable leaves that must
//! survive from one training step to the next. The *transient* region holds everything a
//! forward pass creates (inputs, constants, intermediates) and is bulk-discarded by
//! [`Tape::reset`]. Each reset bumps the tape epoch; a transient [`NodeId`] minted in an
//! earlier epoch is stale and every access through it fails with
//! [`NeuraGradError::StaleNode`].

use crate::autograd::backward_op::Op;
use crate::autograd::graph::topological_sort;
use crate::autograd::trace::NodeRecord;
use crate::error::NeuraGradError;
use crate::value::Value;
use log::{debug, trace};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Region of the arena a node was allocated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Parameter,
    Transient,
}

/// Stable identity of a node inside one [`Tape`].
///
/// Ids are compared by identity, never by the value they point to. Parameter ids carry
/// epoch `0` and stay valid across resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    region: Region,
    index: u32,
    epoch: u64,
}

impl NodeId {
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_parameter(&self) -> bool {
        self.region == Region::Parameter
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.region {
            Region::Parameter => write!(f, "p{}", self.index),
            Region::Transient => write!(f, "t{}@{}", self.index, self.epoch),
        }
    }
}

/// One scalar in the graph.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) op: Op,
    pub(crate) operands: [Option<NodeId>; 2],
    pub(crate) label: Option<String>,
}

impl Node {
    fn leaf(value: f64, label: Option<String>) -> Self {
        Node {
            value,
            grad: 0.0,
            op: Op::Leaf,
            operands: [None, None],
            label,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct TapeInner {
    parameters: Vec<Node>,
    nodes: Vec<Node>,
    epoch: u64,
    // Orders are only valid for the epoch they were computed in; cleared on reset.
    topo_cache: HashMap<NodeId, Rc<[NodeId]>>,
}

impl TapeInner {
    fn region(&self, region: Region) -> &[Node] {
        match region {
            Region::Parameter => &self.parameters,
            Region::Transient => &self.nodes,
        }
    }

    fn check(&self, id: NodeId) -> Result<(), NeuraGradError> {
        if id.region == Region::Transient && id.epoch != self.epoch {
            return Err(NeuraGradError::StaleNode {
                index: id.index(),
                node_epoch: id.epoch,
                tape_epoch: self.epoch,
            });
        }
        let len = self.region(id.region).len();
        if id.index() >= len {
            return Err(NeuraGradError::NodeOutOfBounds {
                index: id.index(),
                len,
            });
        }
        Ok(())
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, NeuraGradError> {
        self.check(id)?;
        Ok(&self.region(id.region)[id.index()])
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, NeuraGradError> {
        self.check(id)?;
        let nodes = match id.region {
            Region::Parameter => &mut self.parameters,
            Region::Transient => &mut self.nodes,
        };
        Ok(&mut nodes[id.index()])
    }

    fn push(&mut self, region: Region, node: Node) -> NodeId {
        let (nodes, epoch) = match region {
            Region::Parameter => (&mut self.parameters, 0),
            Region::Transient => (&mut self.nodes, self.epoch),
        };
        let index = nodes.len() as u32;
        nodes.push(node);
        NodeId {
            region,
            index,
            epoch,
        }
    }

    /// Returns the cached order for `root`, sorting on a cache miss.
    pub(crate) fn topological_order(
        &mut self,
        root: NodeId,
    ) -> Result<Rc<[NodeId]>, NeuraGradError> {
        self.check(root)?;
        if let Some(order) = self.topo_cache.get(&root) {
            return Ok(Rc::clone(order));
        }
        let order: Rc<[NodeId]> = topological_sort(self, root)?.into();
        debug!(
            "Topological order for {} computed: {} nodes",
            root,
            order.len()
        );
        self.topo_cache.insert(root, Rc::clone(&order));
        Ok(order)
    }

    fn reset(&mut self) {
        debug!(
            "Tape reset: discarding {} transient nodes at epoch {}",
            self.nodes.len(),
            self.epoch
        );
        self.nodes.clear();
        self.topo_cache.clear();
        self.epoch += 1;
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let params = (0..self.parameters.len()).map(|i| NodeId {
            region: Region::Parameter,
            index: i as u32,
            epoch: 0,
        });
        let transient = (0..self.nodes.len()).map(move |i| NodeId {
            region: Region::Transient,
            index: i as u32,
            epoch: self.epoch,
        });
        params.chain(transient)
    }
}

/// Shared handle to a computation-graph arena.
///
/// Cloning a `Tape` is cheap and yields another handle to the same arena. Every
/// [`Value`] keeps its tape alive, so handles never dangle; they can only go stale.
#[derive(Clone, Default)]
pub struct Tape {
    inner: Rc<RefCell<TapeInner>>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transient leaf: an input or a constant for the current step.
    pub fn leaf(&self, value: f64) -> Value {
        self.alloc(Region::Transient, Node::leaf(value, None))
    }

    /// Creates a transient leaf carrying a diagnostic label.
    pub fn labeled_leaf(&self, value: f64, label: impl Into<String>) -> Value {
        self.alloc(Region::Transient, Node::leaf(value, Some(label.into())))
    }

    /// Creates a trainable leaf that survives [`Tape::reset`].
    pub fn parameter(&self, value: f64) -> Value {
        self.alloc(Region::Parameter, Node::leaf(value, None))
    }

    /// Creates a trainable leaf carrying a diagnostic label.
    pub fn labeled_parameter(&self, value: f64, label: impl Into<String>) -> Value {
        self.alloc(Region::Parameter, Node::leaf(value, Some(label.into())))
    }

    fn alloc(&self, region: Region, node: Node) -> Value {
        let id = self.borrow_mut().push(region, node);
        trace!("Allocated leaf {}", id);
        Value::new(self.clone(), id)
    }

    /// Appends the result of applying `op` to `operands`.
    ///
    /// # Errors
    /// * `InvalidShape` if the operand count does not match the op's arity.
    /// * `ForeignNode` if an operand belongs to another tape.
    /// * `StaleNode` if an operand was discarded by a reset.
    pub(crate) fn record(&self, op: Op, operands: &[&Value]) -> Result<Value, NeuraGradError> {
        if operands.len() != op.arity() {
            return Err(NeuraGradError::InvalidShape {
                expected: op.arity(),
                actual: operands.len(),
                operation: op.symbol().to_string(),
            });
        }
        if operands.iter().any(|v| !self.same_tape(v.tape())) {
            return Err(NeuraGradError::ForeignNode {
                operation: op.symbol().to_string(),
            });
        }

        let mut inner = self.borrow_mut();
        let mut ids = [None, None];
        let mut inputs = [0.0_f64; 2];
        for (i, operand) in operands.iter().enumerate() {
            inputs[i] = inner.node(operand.id())?.value;
            ids[i] = Some(operand.id());
        }
        let node = Node {
            value: op.forward(inputs[0], inputs[1]),
            grad: 0.0,
            op,
            operands: ids,
            label: None,
        };
        let id = inner.push(Region::Transient, node);
        trace!("Recorded {} = {} {:?}", id, op, ids);
        drop(inner);
        Ok(Value::new(self.clone(), id))
    }

    /// Bulk-discards every transient node and starts a new epoch.
    ///
    /// Parameters, including their values and gradients, are kept.
    pub fn reset(&self) {
        self.borrow_mut().reset();
    }

    /// Sets every parameter gradient on the tape to `0.0` and resets the tape.
    pub fn zero_grad(&self) {
        let mut inner = self.borrow_mut();
        for param in inner.parameters.iter_mut() {
            param.grad = 0.0;
        }
        inner.reset();
    }

    pub fn epoch(&self) -> u64 {
        self.borrow().epoch
    }

    /// Number of transient nodes recorded in the current epoch.
    pub fn len(&self) -> usize {
        self.borrow().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_parameters(&self) -> usize {
        self.borrow().parameters.len()
    }

    /// `true` if both handles point at the same arena.
    pub fn same_tape(&self, other: &Tape) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Read-only snapshot of every live node: parameters first, then transient nodes in
    /// creation order.
    pub fn records(&self) -> Vec<NodeRecord> {
        let inner = self.borrow();
        inner
            .ids()
            .map(|id| NodeRecord::new(id, &inner.region(id.region)[id.index()]))
            .collect()
    }

    pub(crate) fn borrow(&self) -> Ref<'_, TapeInner> {
        self.inner.borrow()
    }

    pub(crate) fn borrow_mut(&self) -> RefMut<'_, TapeInner> {
        self.inner.borrow_mut()
    }
}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.borrow();
        f.debug_struct("Tape")
            .field("epoch", &inner.epoch)
            .field("parameters", &inner.parameters.len())
            .field("transient", &inner.nodes.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tape_test.rs"]
mod tests;
