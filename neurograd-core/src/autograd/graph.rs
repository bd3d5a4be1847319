use crate::error::NeuraGradError;
use crate::tape::{NodeId, TapeInner};
use std::collections::HashSet;

/// Builds a topological sort of the graph reachable from `root`.
///
/// Every reachable node appears exactly once, after all of its operands (DFS post-order).
/// The traversal uses an explicit stack instead of recursion, so graph depth is bounded
/// by heap memory rather than the thread stack. Operand 0 is always visited before
/// operand 1, which makes the order deterministic for a given graph. The visited set is
/// keyed by [`NodeId`], so a node shared by several consumers (a diamond) is emitted once.
///
/// # Errors
/// Returns `StaleNode`/`NodeOutOfBounds` if `root` or any reachable operand is not live.
pub(crate) fn topological_sort(
    tape: &TapeInner,
    root: NodeId,
) -> Result<Vec<NodeId>, NeuraGradError> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted = Vec::new();
    // (node, operands_pushed)
    let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            sorted.push(id);
            continue;
        }
        if !visited.insert(id) {
            continue;
        }
        stack.push((id, true));
        let node = tape.node(id)?;
        // Reversed so that operand 0 is popped first.
        for operand in node.operands.iter().rev().flatten() {
            if !visited.contains(operand) {
                stack.push((*operand, false));
            }
        }
    }
    Ok(sorted)
}
