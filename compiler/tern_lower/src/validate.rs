//! Post-lowering IR validation.
//!
//! Debug-time checks that the graph a pass hands forward is well-formed:
//! every child reference points inside the arena, and (once the
//! imperative lowering has run) no high-level iteration construct is
//! still reachable.

use rustc_hash::FxHashSet;
use tern_ir::{IrArena, NodeId, NodeKind};

use crate::error::LowerError;

/// Check that every reachable child reference points inside the arena.
pub fn validate(arena: &IrArena, root: NodeId) -> Result<(), LowerError> {
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        for child in arena.children(id) {
            if child.index() >= arena.len() {
                return Err(LowerError::DanglingChild { parent: id, child });
            }
            stack.push(child);
        }
    }

    Ok(())
}

/// Check whether any high-level `For` node is still reachable.
pub fn has_unlowered_for(arena: &IrArena, root: NodeId) -> bool {
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        if matches!(arena.kind(id), NodeKind::For { .. }) {
            return true;
        }
        stack.extend(arena.children(id));
    }

    false
}
