//! Literal typing rules.
//!
//! Scalar literals are terminal: they unify with their builtin type and
//! finish in one visit, independent of surrounding context. The `none`
//! literal is generic — it types as `Optional[?]` and finishes only once
//! the inner type is pinned down and the instantiation realizes.

use tern_ir::NodeId;
use tern_types::Idx;

use super::TypeChecker;
use crate::error::diagnose_unify_error;
use crate::realize::Realize;

impl TypeChecker<'_> {
    /// Set type to `Optional[?]`.
    pub(crate) fn check_none_lit(&mut self, id: NodeId) {
        let span = self.arena.span(id);
        let ty = self.node_type(id);

        let Some(optional) = self.ctx.get_type(self.ctx.builtins.optional) else {
            // Builtins are seeded at context creation; an unseeded context
            // leaves nothing to unify against.
            return;
        };
        let inst = match self.pool.instantiate(optional, &[]) {
            Ok(inst) => inst,
            Err(err) => {
                let diag = diagnose_unify_error(&err, span, self.pool, self.interner);
                self.diags.emit(diag);
                return;
            }
        };

        if !self.unify(ty, inst, span) {
            // A hard mismatch cannot improve on revisit.
            self.mark_done(id);
            return;
        }

        // Realize the empty-optional constructor for this instantiation
        // once the inner type has been resolved from context.
        if let Realize::Ready(_) = self.realize(ty) {
            self.mark_done(id);
        }
    }

    /// Set type to the given builtin scalar.
    ///
    /// Builtin scalars are non-generic and never require realization.
    pub(crate) fn check_scalar_lit(&mut self, id: NodeId, builtin: Idx) {
        let span = self.arena.span(id);
        let ty = self.node_type(id);
        self.unify(ty, builtin, span);
        self.mark_done(id);
    }
}
