//! Generic instantiation.
//!
//! Turns a generic definition (a scheme) into a usable type term by
//! substituting concrete types — or fresh variables — for its quantified
//! parameters. Instantiation produces a type; it does not generate code.
//! Producing the monomorphized implementation is realization, which lives
//! with the typecheck context.

use crate::{ArityKind, Idx, Pool, Tag, TypeFlags, UnifyError};

impl Pool {
    /// Instantiate a generic definition.
    ///
    /// - With `supplied` empty, every parameter becomes a fresh unbound
    ///   variable (to be pinned down by later unification).
    /// - With `supplied` given, its length must match the scheme's
    ///   parameter count; a mismatch is a hard [`UnifyError::ArityMismatch`].
    ///
    /// A non-scheme input is already concrete and is returned unchanged.
    pub fn instantiate(&mut self, ty: Idx, supplied: &[Idx]) -> Result<Idx, UnifyError> {
        if self.tag(ty) != Tag::Scheme {
            return Ok(ty);
        }

        let count = self.scheme_param_count(ty) as usize;
        let args: Vec<Idx> = if supplied.is_empty() {
            (0..count).map(|_| self.fresh_var()).collect()
        } else if supplied.len() == count {
            supplied.to_vec()
        } else {
            return Err(UnifyError::ArityMismatch {
                expected: count,
                found: supplied.len(),
                kind: ArityKind::TypeArgs,
            });
        };

        let body = self.scheme_body(ty);
        Ok(self.substitute_bound(body, &args))
    }

    /// Rebuild `ty` with each quantified placeholder replaced by the
    /// matching argument.
    fn substitute_bound(&mut self, ty: Idx, args: &[Idx]) -> Idx {
        if !self.flags(ty).contains(TypeFlags::HAS_BOUND_VAR) {
            return ty;
        }
        match self.tag(ty) {
            Tag::BoundVar => {
                let index = self.data(ty) as usize;
                args.get(index).copied().unwrap_or(ty)
            }
            Tag::Optional => {
                let held = self.held(ty);
                let substituted = self.substitute_bound(held, args);
                self.optional(substituted)
            }
            Tag::Union => {
                let held = self.held(ty);
                let substituted = self.substitute_bound(held, args);
                self.union(substituted)
            }
            Tag::Class => {
                let name = self.class_name(ty);
                let class_args = self.class_args(ty);
                let mut substituted = Vec::with_capacity(class_args.len());
                for arg in class_args {
                    substituted.push(self.substitute_bound(arg, args));
                }
                self.class(name, &substituted)
            }
            Tag::Function => {
                let params = self.function_params(ty);
                let ret = self.function_return(ty);
                let mut substituted = Vec::with_capacity(params.len());
                for param in params {
                    substituted.push(self.substitute_bound(param, args));
                }
                let ret = self.substitute_bound(ret, args);
                self.function(&substituted, ret)
            }
            Tag::Scheme => {
                // Nested schemes keep their own quantification.
                let count = self.scheme_param_count(ty);
                let body = self.scheme_body(ty);
                let substituted = self.substitute_bound(body, args);
                self.scheme(count, substituted)
            }
            Tag::Bool | Tag::Int | Tag::Float | Tag::Str | Tag::Unit | Tag::Var => ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Idx, Pool, Tag, UnifyEngine, UnifyError};
    use tern_ir::StringInterner;

    fn optional_scheme(pool: &mut Pool) -> Idx {
        let bound = pool.bound_var(0);
        let body = pool.optional(bound);
        pool.scheme(1, body)
    }

    #[test]
    fn instantiate_with_fresh_variables() {
        let mut pool = Pool::new();
        let scheme = optional_scheme(&mut pool);

        let inst = pool.instantiate(scheme, &[]).unwrap();
        assert_eq!(pool.tag(inst), Tag::Optional);
        assert_eq!(pool.tag(pool.held(inst)), Tag::Var);
    }

    #[test]
    fn instantiate_with_supplied_arguments() {
        let mut pool = Pool::new();
        let scheme = optional_scheme(&mut pool);

        let inst = pool.instantiate(scheme, &[Idx::INT]).unwrap();
        let expected = pool.optional(Idx::INT);
        assert_eq!(inst, expected);
    }

    #[test]
    fn instantiate_arity_mismatch_is_hard_error() {
        let mut pool = Pool::new();
        let scheme = optional_scheme(&mut pool);

        let result = pool.instantiate(scheme, &[Idx::INT, Idx::STR]);
        assert!(matches!(result, Err(UnifyError::ArityMismatch { .. })));
    }

    #[test]
    fn non_scheme_is_returned_unchanged() {
        let mut pool = Pool::new();
        assert_eq!(pool.instantiate(Idx::INT, &[]).unwrap(), Idx::INT);
    }

    #[test]
    fn separate_instantiations_are_independent() {
        let interner = StringInterner::new();
        let mut pool = Pool::new();
        let name = interner.intern("Box");
        let bound = pool.bound_var(0);
        let body = pool.class(name, &[bound]);
        let scheme = pool.scheme(1, body);

        let first = pool.instantiate(scheme, &[]).unwrap();
        let second = pool.instantiate(scheme, &[]).unwrap();

        let mut engine = UnifyEngine::new(&mut pool);
        let concrete_first = engine.pool_mut().class(name, &[Idx::INT]);
        engine.unify(first, concrete_first).unwrap();

        // Binding the first instantiation leaves the second open.
        let second_arg = engine.pool().class_args(second)[0];
        assert!(engine.pool().contains_unbound(second_arg));
    }
}
