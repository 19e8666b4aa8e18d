//! Type unification engine.
//!
//! Link-based unification with path compression: variables are linked
//! directly to their unified type (no substitution maps), and resolution
//! shortens chains as it follows them. The occurs check is flag-gated —
//! when a term's `HAS_VAR` flag is clear the traversal is skipped.
//!
//! Unification is idempotent once both sides are fully bound: re-unifying
//! already-equal terms succeeds with no further mutation, which the
//! fixpoint type checker relies on when it revisits nodes.

mod error;

pub use error::{ArityKind, UnifyContext, UnifyError};

use crate::{Idx, Pool, Tag, TypeFlags, VarState};

/// The unification engine.
///
/// Borrows the pool mutably for the duration of a unification session;
/// bindings it creates persist in the pool afterwards.
pub struct UnifyEngine<'pool> {
    pool: &'pool mut Pool,
}

impl<'pool> UnifyEngine<'pool> {
    /// Create a new unification engine.
    pub fn new(pool: &'pool mut Pool) -> Self {
        Self { pool }
    }

    /// Get read-only access to the pool.
    #[inline]
    pub fn pool(&self) -> &Pool {
        self.pool
    }

    /// Get mutable access to the pool (for type construction).
    #[inline]
    pub fn pool_mut(&mut self) -> &mut Pool {
        self.pool
    }

    // === Resolution ===

    /// Resolve a type by following links.
    ///
    /// Applies path compression: intermediate links are updated to point
    /// directly at the final target.
    pub fn resolve(&mut self, idx: Idx) -> Idx {
        // Fast path: not a variable
        if self.pool.tag(idx) != Tag::Var {
            return idx;
        }

        let var_id = self.pool.data(idx);
        match self.pool.var_state(var_id) {
            VarState::Link { target } => {
                let target = *target;
                let resolved = self.resolve(target);
                if resolved != target {
                    *self.pool.var_state_mut(var_id) = VarState::Link { target: resolved };
                }
                resolved
            }
            VarState::Unbound { .. } => idx,
        }
    }

    /// Resolve without mutation (for read-only queries).
    pub fn resolve_readonly(&self, idx: Idx) -> Idx {
        if self.pool.tag(idx) != Tag::Var {
            return idx;
        }

        let var_id = self.pool.data(idx);
        match self.pool.var_state(var_id) {
            VarState::Link { target } => self.resolve_readonly(*target),
            VarState::Unbound { .. } => idx,
        }
    }

    // === Unification ===

    /// Unify two types, making them equivalent.
    ///
    /// After successful unification both types resolve to the same term.
    pub fn unify(&mut self, a: Idx, b: Idx) -> Result<(), UnifyError> {
        self.unify_with_context(a, b, UnifyContext::TopLevel)
    }

    /// Unify with explicit context for better error messages.
    pub fn unify_with_context(
        &mut self,
        a: Idx,
        b: Idx,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        // Fast path: identical indices
        if a == b {
            return Ok(());
        }

        let a = self.resolve(a);
        let b = self.resolve(b);

        if a == b {
            return Ok(());
        }

        let a_tag = self.pool.tag(a);
        let b_tag = self.pool.tag(b);

        // Schemes must be instantiated before they reach unification.
        if a_tag == Tag::Scheme || b_tag == Tag::Scheme {
            let scheme = if a_tag == Tag::Scheme { a } else { b };
            tracing::error!(?scheme, "scheme reached unification without instantiation");
            return Err(UnifyError::UninstantiatedScheme { scheme });
        }

        match (a_tag, b_tag) {
            // Variable on left
            (Tag::Var, _) => self.unify_var_with(a, b, context),

            // Variable on right (swap to normalize)
            (_, Tag::Var) => self.unify_var_with(b, a, context),

            // Structural unification for concrete types
            _ => self.unify_structural(a, b, context),
        }
    }

    /// Unify a variable with another type.
    fn unify_var_with(
        &mut self,
        var_idx: Idx,
        other: Idx,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        let var_id = self.pool.data(var_idx);

        // Occurs check: prevent infinite types
        if self.occurs(var_id, other) {
            return Err(UnifyError::InfiniteType {
                var_id,
                containing_type: other,
            });
        }

        match self.pool.var_state(var_id) {
            VarState::Unbound { .. } => {
                tracing::trace!(var_id, ?other, "binding type variable");
                *self.pool.var_state_mut(var_id) = VarState::Link { target: other };
                Ok(())
            }
            // Should not happen after resolve(), but handle it
            VarState::Link { target } => {
                let target = *target;
                self.unify_with_context(target, other, context)
            }
        }
    }

    // === Occurs Check ===

    /// Check if variable `var_id` occurs in type `ty`.
    ///
    /// Flag-gated: if the type has no variables, the traversal is skipped
    /// entirely.
    fn occurs(&self, var_id: u32, ty: Idx) -> bool {
        if !self.pool.flags(ty).contains(TypeFlags::HAS_VAR) {
            return false;
        }
        self.occurs_inner(var_id, ty)
    }

    fn occurs_inner(&self, var_id: u32, ty: Idx) -> bool {
        match self.pool.tag(ty) {
            Tag::Var => {
                let other_id = self.pool.data(ty);
                if other_id == var_id {
                    return true;
                }
                if let VarState::Link { target } = self.pool.var_state(other_id) {
                    return self.occurs_inner(var_id, *target);
                }
                false
            }

            Tag::Optional | Tag::Union => self.occurs_inner(var_id, self.pool.held(ty)),

            Tag::Class => self
                .pool
                .class_args(ty)
                .iter()
                .any(|&arg| self.occurs_inner(var_id, arg)),

            Tag::Function => {
                self.pool
                    .function_params(ty)
                    .iter()
                    .any(|&param| self.occurs_inner(var_id, param))
                    || self.occurs_inner(var_id, self.pool.function_return(ty))
            }

            Tag::Scheme => self.occurs_inner(var_id, self.pool.scheme_body(ty)),

            // Other types don't contain variables
            Tag::Bool | Tag::Int | Tag::Float | Tag::Str | Tag::Unit | Tag::BoundVar => false,
        }
    }

    // === Structural Unification ===

    /// Unify two concrete (non-variable) types structurally.
    fn unify_structural(
        &mut self,
        a: Idx,
        b: Idx,
        context: UnifyContext,
    ) -> Result<(), UnifyError> {
        let tag_a = self.pool.tag(a);
        let tag_b = self.pool.tag(b);

        if tag_a != tag_b {
            // An unwrapped term implicitly widens into the matching
            // wrapper variant: `T` unifies against `T?` by unifying the
            // contents. Distinct wrappers also unify by contents.
            return match (tag_a.is_wrapper(), tag_b.is_wrapper()) {
                (true, true) => {
                    let held_a = self.pool.held(a);
                    let held_b = self.pool.held(b);
                    self.unify_with_context(held_a, held_b, UnifyContext::WrapperInner)
                }
                (true, false) => {
                    let held_a = self.pool.held(a);
                    self.unify_with_context(held_a, b, UnifyContext::WrapperInner)
                }
                (false, true) => {
                    let held_b = self.pool.held(b);
                    self.unify_with_context(a, held_b, UnifyContext::WrapperInner)
                }
                (false, false) => Err(UnifyError::Mismatch {
                    expected: a,
                    found: b,
                    context,
                }),
            };
        }

        match tag_a {
            // Primitives: same tag means equal
            Tag::Bool | Tag::Int | Tag::Float | Tag::Str | Tag::Unit => Ok(()),

            // Wrappers: unify contents
            Tag::Optional | Tag::Union => {
                let held_a = self.pool.held(a);
                let held_b = self.pool.held(b);
                self.unify_with_context(held_a, held_b, UnifyContext::WrapperInner)
            }

            // Classes: same name, then unify args pairwise
            Tag::Class => {
                let name_a = self.pool.class_name(a);
                let name_b = self.pool.class_name(b);

                if name_a != name_b {
                    return Err(UnifyError::Mismatch {
                        expected: a,
                        found: b,
                        context,
                    });
                }

                let args_a = self.pool.class_args(a);
                let args_b = self.pool.class_args(b);

                if args_a.len() != args_b.len() {
                    return Err(UnifyError::ArityMismatch {
                        expected: args_a.len(),
                        found: args_b.len(),
                        kind: ArityKind::TypeArgs,
                    });
                }

                for (i, (&arg_a, &arg_b)) in args_a.iter().zip(args_b.iter()).enumerate() {
                    self.unify_with_context(arg_a, arg_b, UnifyContext::type_arg(i))?;
                }

                Ok(())
            }

            // Functions: params pairwise, then return
            Tag::Function => {
                let params_a = self.pool.function_params(a);
                let params_b = self.pool.function_params(b);

                if params_a.len() != params_b.len() {
                    return Err(UnifyError::ArityMismatch {
                        expected: params_a.len(),
                        found: params_b.len(),
                        kind: ArityKind::Function,
                    });
                }

                for (i, (&param_a, &param_b)) in params_a.iter().zip(params_b.iter()).enumerate() {
                    self.unify_with_context(param_a, param_b, UnifyContext::param(i))?;
                }

                let ret_a = self.pool.function_return(a);
                let ret_b = self.pool.function_return(b);
                self.unify_with_context(ret_a, ret_b, UnifyContext::FunctionReturn)
            }

            // Distinct bound placeholders, or anything else: mismatch
            Tag::Var | Tag::BoundVar | Tag::Scheme => Err(UnifyError::Mismatch {
                expected: a,
                found: b,
                context,
            }),
        }
    }
}
