//! The fixpoint driver.
//!
//! Forward references and generics mean a single top-down traversal
//! cannot resolve everything, so the visitor is iterated until no node's
//! done flag newly flips. A bounded pass budget is the only safeguard
//! against non-termination; exhausting it is a compilation error, never a
//! crash or silent truncation.

use rustc_hash::FxHashSet;
use tern_diagnostic::DiagnosticQueue;
use tern_ir::{IrArena, NodeId, StringInterner};
use tern_types::{Idx, Pool};

use crate::error::diagnose_unresolved;
use crate::{Context, TypeChecker};

/// Fixpoint configuration.
#[derive(Copy, Clone, Debug)]
pub struct TypecheckOptions {
    /// Maximum number of visitor passes before giving up.
    pub max_passes: usize,
}

impl Default for TypecheckOptions {
    fn default() -> Self {
        TypecheckOptions { max_passes: 50 }
    }
}

/// Type-check the subtrees under `roots` to a fixpoint.
///
/// Returns whether every reachable node resolved without errors.
/// Problems are reported to `diags` either way; checking continues past
/// failures so a run batches as many errors as it can.
pub fn typecheck(
    arena: &mut IrArena,
    pool: &mut Pool,
    ctx: &mut Context,
    interner: &StringInterner,
    diags: &mut DiagnosticQueue,
    roots: &[NodeId],
    options: TypecheckOptions,
) -> bool {
    for pass in 0..options.max_passes {
        let mut checker = TypeChecker::new(arena, pool, ctx, diags, interner);
        for &root in roots {
            checker.visit(root);
        }
        let newly_done = checker.newly_done();
        tracing::debug!(pass, newly_done, "typecheck pass complete");

        if reachable(arena, roots)
            .iter()
            .all(|&id| arena.is_done(id))
        {
            return !diags.has_errors();
        }
        if newly_done == 0 {
            // No progress: further passes revisit the same undone nodes
            // with the same state.
            break;
        }
    }

    // Budget exhausted (or stalled) with nodes still unresolved.
    for id in reachable(arena, roots) {
        if !arena.is_done(id) {
            let slot = arena.ty(id);
            let ty = slot.is_valid().then(|| Idx::from_raw(slot.raw()));
            diags.emit(diagnose_unresolved(arena.span(id), pool, interner, ty));
        }
    }
    false
}

/// All nodes reachable from `roots`, in discovery order.
fn reachable(arena: &IrArena, roots: &[NodeId]) -> Vec<NodeId> {
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut order = Vec::new();
    let mut stack: Vec<NodeId> = roots.to_vec();

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        order.push(id);
        stack.extend(arena.children(id));
    }

    order
}
