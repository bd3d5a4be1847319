use crate::autograd::backward_op::Op;
use crate::tape::{Node, NodeId};

/// Read-only snapshot of one node, for external graph tooling.
///
/// A stream of records (see [`crate::Value::trace`] and [`crate::Tape::records`]) is all a
/// visualiser needs: edges are given by `operands`, which always refer to records that
/// appear earlier in a trace.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub label: Option<String>,
    pub value: f64,
    pub grad: f64,
    pub op: Op,
    pub operands: Vec<NodeId>,
}

impl NodeRecord {
    pub(crate) fn new(id: NodeId, node: &Node) -> Self {
        NodeRecord {
            id,
            label: node.label.clone(),
            value: node.value,
            grad: node.grad,
            op: node.op,
            operands: node.operands.iter().flatten().copied().collect(),
        }
    }
}
