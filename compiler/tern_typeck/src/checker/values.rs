//! Variable, assignment, call, and function rules.

use tern_ir::NodeId;
use tern_types::{Idx, Tag, UnifyEngine};

use super::TypeChecker;
use crate::error::diagnose_unify_error;

impl TypeChecker<'_> {
    /// A storage variable resolves when its type does.
    ///
    /// A declaration seeded into the scope chain by name resolution
    /// constrains the variable's type.
    pub(crate) fn check_var(&mut self, id: NodeId) {
        let ty = self.node_type(id);

        let name = self.arena.name(id);
        if !name.is_empty() {
            if let Some(declared) = self.ctx.lookup(name) {
                let span = self.arena.span(id);
                self.unify(ty, declared, span);
            }
        }

        if self.is_concrete(ty) {
            self.mark_done(id);
        }
    }

    /// A read types as the variable it reads.
    pub(crate) fn check_var_ref(&mut self, id: NodeId, var: NodeId) {
        self.visit(var);

        let span = self.arena.span(id);
        let ty = self.node_type(id);
        let var_ty = self.node_type(var);
        if !self.unify(ty, var_ty, span) {
            self.mark_done(id);
            return;
        }
        if self.is_concrete(ty) {
            self.mark_done(id);
        }
    }

    /// A write unifies the variable's type with the value's.
    pub(crate) fn check_assign(&mut self, id: NodeId, var: NodeId, value: NodeId) {
        self.visit(var);
        self.visit(value);

        let span = self.arena.span(id);
        let var_ty = self.node_type(var);
        let value_ty = self.node_type(value);
        self.unify(var_ty, value_ty, span);

        let ty = self.node_type(id);
        self.unify(ty, Idx::UNIT, span);

        if self.children_done(id) {
            self.mark_done(id);
        }
    }

    /// A call unifies the callee against `(arg types) -> ret`.
    ///
    /// A generic callee is instantiated per call site, so two calls to
    /// the same definition can resolve to different concrete types.
    pub(crate) fn check_call(&mut self, id: NodeId, callee: NodeId, args: &[NodeId]) {
        self.visit(callee);
        for &arg in args {
            self.visit(arg);
        }

        let span = self.arena.span(id);
        let ret = self.node_type(id);
        let arg_tys: Vec<Idx> = args.iter().map(|&arg| self.node_type(arg)).collect();
        let expected = self.pool.function(&arg_tys, ret);

        let callee_ty = self.node_type(callee);
        let resolved = UnifyEngine::new(self.pool).resolve(callee_ty);
        let target = if self.pool.tag(resolved) == Tag::Scheme {
            match self.pool.instantiate(resolved, &[]) {
                Ok(target) => target,
                Err(err) => {
                    let diag = diagnose_unify_error(&err, span, self.pool, self.interner);
                    self.diags.emit(diag);
                    return;
                }
            }
        } else {
            resolved
        };

        if !self.unify(target, expected, span) {
            self.mark_done(id);
            return;
        }

        if self.is_concrete(ret) && self.children_done(id) {
            self.mark_done(id);
        }
    }

    /// A function value types as `(param types) -> ret`.
    pub(crate) fn check_func(&mut self, id: NodeId, params: &[NodeId], body: Option<NodeId>) {
        for &param in params {
            self.visit(param);
        }
        if let Some(body) = body {
            self.visit(body);
        }

        let span = self.arena.span(id);
        let ty = self.node_type(id);

        // Generic definitions are checked at their instantiation sites;
        // the closed scheme itself has nothing left to resolve.
        let resolved = UnifyEngine::new(self.pool).resolve(ty);
        if self.pool.tag(resolved) == Tag::Scheme {
            self.mark_done(id);
            return;
        }

        // A bodiless function is an intrinsic: its pre-assigned signature
        // is complete as-is.
        let Some(body) = body else {
            if self.is_concrete(ty) && self.children_done(id) {
                self.mark_done(id);
            }
            return;
        };

        let param_tys: Vec<Idx> = params.iter().map(|&param| self.node_type(param)).collect();
        let ret = self.node_type(body);
        let expected = self.pool.function(&param_tys, ret);
        self.unify(ty, expected, span);

        if self.is_concrete(ty) && self.children_done(id) {
            self.mark_done(id);
        }
    }
}
