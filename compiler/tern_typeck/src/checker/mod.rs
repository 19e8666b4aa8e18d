//! The typecheck visitor.
//!
//! One rule per node kind, dispatched by exhaustive match. Each rule
//! unifies the node's type against the expectation its context implies,
//! reports failures to the diagnostic queue (and keeps checking other
//! subtrees), attempts realization only once its types are variable-free,
//! and marks the node done exactly when no further visit can change its
//! resolved type.
//!
//! The visitor is re-entrant: visiting an already-done node is a no-op,
//! which the fixpoint loop depends on.

mod control;
mod literals;
mod values;

use tern_diagnostic::DiagnosticQueue;
use tern_ir::{IrArena, NodeId, NodeKind, Span, StringInterner, TypeId};
use tern_types::{Idx, Pool, UnifyEngine};

use crate::error::diagnose_unify_error;
use crate::stack::ensure_sufficient_stack;
use crate::Context;

/// The typecheck visitor for one compilation unit.
pub struct TypeChecker<'a> {
    pub(crate) arena: &'a mut IrArena,
    pub(crate) pool: &'a mut Pool,
    pub(crate) ctx: &'a mut Context,
    pub(crate) diags: &'a mut DiagnosticQueue,
    pub(crate) interner: &'a StringInterner,
    /// Nodes whose done flag flipped during this visitor's lifetime.
    pub(crate) newly_done: usize,
}

impl<'a> TypeChecker<'a> {
    /// Create a visitor over the given compilation state.
    pub fn new(
        arena: &'a mut IrArena,
        pool: &'a mut Pool,
        ctx: &'a mut Context,
        diags: &'a mut DiagnosticQueue,
        interner: &'a StringInterner,
    ) -> Self {
        TypeChecker {
            arena,
            pool,
            ctx,
            diags,
            interner,
            newly_done: 0,
        }
    }

    /// Number of done flags flipped so far.
    pub fn newly_done(&self) -> usize {
        self.newly_done
    }

    /// Visit a node, applying the rule for its kind.
    ///
    /// Re-visiting a done node is a no-op.
    pub fn visit(&mut self, id: NodeId) {
        if self.arena.is_done(id) {
            return;
        }
        ensure_sufficient_stack(|| self.visit_inner(id));
    }

    fn visit_inner(&mut self, id: NodeId) {
        let kind = self.arena.kind(id).clone();
        match kind {
            NodeKind::NoneLit => self.check_none_lit(id),
            NodeKind::BoolLit(_) => self.check_scalar_lit(id, Idx::BOOL),
            NodeKind::IntLit(_) => self.check_scalar_lit(id, Idx::INT),
            NodeKind::FloatLit(_) => self.check_scalar_lit(id, Idx::FLOAT),
            NodeKind::StrLit(_) => self.check_scalar_lit(id, Idx::STR),
            NodeKind::Var { .. } => self.check_var(id),
            NodeKind::VarRef { var } => self.check_var_ref(id, var),
            NodeKind::Assign { var, value } => self.check_assign(id, var, value),
            NodeKind::Call { callee, args } => self.check_call(id, callee, &args),
            NodeKind::Func { params, body } => self.check_func(id, &params, body),
            NodeKind::Block { body } => self.check_block(id, &body),
            NodeKind::If {
                cond,
                then_body,
                else_body,
            } => self.check_if(id, cond, then_body, else_body),
            NodeKind::While { cond, body } => self.check_while(id, cond, body),
            NodeKind::For { iter, var, body } => self.check_for(id, iter, var, body),
        }
    }

    // === Shared helpers ===

    /// Get the node's type, creating a fresh variable for an empty slot.
    pub(crate) fn node_type(&mut self, id: NodeId) -> Idx {
        let slot = self.arena.ty(id);
        if slot.is_valid() {
            Idx::from_raw(slot.raw())
        } else {
            let var = self.pool.fresh_var();
            self.arena.set_ty(id, TypeId::from_raw(var.raw()));
            var
        }
    }

    /// Unify two terms, reporting failure at `span`.
    ///
    /// Returns whether unification succeeded. Failure is recorded and
    /// checking continues; independent subtrees still get checked.
    pub(crate) fn unify(&mut self, a: Idx, b: Idx, span: Span) -> bool {
        match UnifyEngine::new(self.pool).unify(a, b) {
            Ok(()) => true,
            Err(err) => {
                let diag = diagnose_unify_error(&err, span, self.pool, self.interner);
                self.diags.emit(diag);
                false
            }
        }
    }

    /// Flip the done flag, counting the transition.
    pub(crate) fn mark_done(&mut self, id: NodeId) {
        if !self.arena.is_done(id) {
            self.arena.set_done(id);
            self.newly_done += 1;
        }
    }

    /// Check that every child has resolved.
    pub(crate) fn children_done(&self, id: NodeId) -> bool {
        self.arena
            .children(id)
            .iter()
            .all(|&child| self.arena.is_done(child))
    }

    /// Check that no unbound variable is reachable from `ty`.
    pub(crate) fn is_concrete(&self, ty: Idx) -> bool {
        !self.pool.contains_unbound(ty)
    }
}

#[cfg(test)]
mod tests;
