//! The operator-pass framework.
//!
//! An operator pass visits IR nodes and rewrites the kinds it cares
//! about, leaving the rest to the default traversal. Passes run in a
//! fixed, registration-ordered sequence under the [`PassManager`], and
//! every pass must be idempotent on already-lowered IR: re-running finds
//! no matching high-level node and is a no-op.
//!
//! Replacement goes through the mutation protocol. A pass returns the
//! replacement node; the framework substitutes it into the parent's
//! slots. The framework just enumerated the child in the parent, so a
//! zero-slot substitution can only mean a buggy node implementation —
//! that is an identity violation, fatal to the run.

use tern_ir::{IrArena, NodeId, StringInterner};
use tern_types::Pool;

use crate::error::LowerError;

/// Shared state handed to each pass.
pub struct RewriteCx<'a> {
    /// The IR being rewritten. The pass owns it exclusively for the
    /// duration of the rewrite.
    pub arena: &'a mut IrArena,
    /// The type pool, for typing synthesized nodes.
    pub pool: &'a mut Pool,
    /// Interner for naming synthesized variables and functions.
    pub interner: &'a StringInterner,
}

/// An IR-to-IR rewrite over operator/control-flow nodes.
pub trait OperatorPass {
    /// Stable key for ordering and diagnostics.
    fn key(&self) -> &'static str;

    /// Inspect one node.
    ///
    /// Return `Some(replacement)` to substitute `replacement` for `id` in
    /// its parent, or `None` to leave the node untouched. Children have
    /// already been handled when this is called (postorder).
    fn handle(&mut self, cx: &mut RewriteCx<'_>, id: NodeId) -> Option<NodeId>;
}

/// Runs registered passes in order over an IR graph.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn OperatorPass>>,
}

impl PassManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass to the sequence.
    pub fn register(&mut self, pass: Box<dyn OperatorPass>) {
        self.passes.push(pass);
    }

    /// Run every registered pass over the graph under `root`.
    ///
    /// Returns the (possibly replaced) root.
    pub fn run(&mut self, cx: &mut RewriteCx<'_>, root: NodeId) -> Result<NodeId, LowerError> {
        let mut root = root;
        for pass in &mut self.passes {
            tracing::debug!(key = pass.key(), "running operator pass");
            root = run_pass(pass.as_mut(), cx, root)?;
        }

        #[cfg(debug_assertions)]
        crate::validate(cx.arena, root)?;

        Ok(root)
    }
}

/// Run a single pass over the graph under `root`, returning the
/// (possibly replaced) root.
pub fn run_pass(
    pass: &mut dyn OperatorPass,
    cx: &mut RewriteCx<'_>,
    root: NodeId,
) -> Result<NodeId, LowerError> {
    let replaced = apply(pass, cx, root)?;
    Ok(replaced.unwrap_or(root))
}

/// Postorder application: children first, then the node itself.
fn apply(
    pass: &mut dyn OperatorPass,
    cx: &mut RewriteCx<'_>,
    id: NodeId,
) -> Result<Option<NodeId>, LowerError> {
    for child in cx.arena.children(id) {
        if let Some(new_child) = apply(pass, cx, child)? {
            let count = cx.arena.replace_used_value(id, child, new_child)
                + cx.arena.replace_used_variable(id, child, new_child);
            if count == 0 {
                // The child was just enumerated in this parent; zero
                // rewritten slots means the node kind's slot reporting
                // is wrong.
                return Err(LowerError::IdentityViolation {
                    parent: id,
                    child,
                });
            }
        }
    }
    Ok(pass.handle(cx, id))
}
