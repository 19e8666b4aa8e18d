//! Control flow rules.
//!
//! Flows are statements: their own type is `unit`. Conditions must be
//! `bool`; the iterable of a `for` must be an `Iterator` of the loop
//! variable's type.

use tern_ir::NodeId;
use tern_types::Idx;

use super::TypeChecker;
use crate::error::diagnose_unify_error;

impl TypeChecker<'_> {
    /// A block visits its nodes in order and types as `unit`.
    pub(crate) fn check_block(&mut self, id: NodeId, body: &[NodeId]) {
        for &node in body {
            self.visit(node);
        }

        let span = self.arena.span(id);
        let ty = self.node_type(id);
        self.unify(ty, Idx::UNIT, span);

        if self.children_done(id) {
            self.mark_done(id);
        }
    }

    /// An if checks its condition against `bool`.
    pub(crate) fn check_if(
        &mut self,
        id: NodeId,
        cond: NodeId,
        then_body: NodeId,
        else_body: Option<NodeId>,
    ) {
        self.visit(cond);
        self.visit(then_body);
        if let Some(else_body) = else_body {
            self.visit(else_body);
        }

        let cond_span = self.arena.span(cond);
        let cond_ty = self.node_type(cond);
        self.unify(cond_ty, Idx::BOOL, cond_span);

        let span = self.arena.span(id);
        let ty = self.node_type(id);
        self.unify(ty, Idx::UNIT, span);

        if self.children_done(id) {
            self.mark_done(id);
        }
    }

    /// A while checks its condition against `bool`.
    pub(crate) fn check_while(&mut self, id: NodeId, cond: NodeId, body: NodeId) {
        self.visit(cond);
        self.visit(body);

        let cond_span = self.arena.span(cond);
        let cond_ty = self.node_type(cond);
        self.unify(cond_ty, Idx::BOOL, cond_span);

        let span = self.arena.span(id);
        let ty = self.node_type(id);
        self.unify(ty, Idx::UNIT, span);

        if self.children_done(id) {
            self.mark_done(id);
        }
    }

    /// A for unifies its iterable with `Iterator[elem]` where `elem` is
    /// the loop variable's type.
    pub(crate) fn check_for(&mut self, id: NodeId, iter: NodeId, var: NodeId, body: NodeId) {
        self.visit(iter);
        self.visit(var);
        self.visit(body);

        let iter_span = self.arena.span(iter);
        let iter_ty = self.node_type(iter);
        let var_ty = self.node_type(var);

        let Some(iterator) = self.ctx.get_type(self.ctx.builtins.iterator) else {
            return;
        };
        match self.pool.instantiate(iterator, &[var_ty]) {
            Ok(expected) => {
                self.unify(iter_ty, expected, iter_span);
            }
            Err(err) => {
                let diag = diagnose_unify_error(&err, iter_span, self.pool, self.interner);
                self.diags.emit(diag);
            }
        }

        let span = self.arena.span(id);
        let ty = self.node_type(id);
        self.unify(ty, Idx::UNIT, span);

        if self.children_done(id) {
            self.mark_done(id);
        }
    }
}
