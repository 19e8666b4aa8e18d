//! Type construction helpers for the Pool.
//!
//! Provides ergonomic methods for creating compound types. All
//! constructors hash-cons: building the same shape twice returns the
//! same index.

use tern_ir::Name;

use crate::{Idx, Pool, Tag, TypeFlags};

impl Pool {
    // === Wrapper Constructors ===

    /// Create an optional type over `inner`.
    pub fn optional(&mut self, inner: Idx) -> Idx {
        let flags = TypeFlags::IS_WRAPPER | self.flags(inner).propagated();
        self.intern_inline(Tag::Optional, inner.raw(), flags)
    }

    /// Create a union wrapper over `inner`.
    pub fn union(&mut self, inner: Idx) -> Idx {
        let flags = TypeFlags::IS_WRAPPER | self.flags(inner).propagated();
        self.intern_inline(Tag::Union, inner.raw(), flags)
    }

    // === Class Constructor ===

    /// Create a nominal class type with ordered generic arguments.
    ///
    /// A non-generic class is a class with zero arguments.
    pub fn class(&mut self, name: Name, args: &[Idx]) -> Idx {
        // Layout: [name, arg_count, arg0, arg1, ...]
        let mut payload = Vec::with_capacity(args.len() + 2);
        payload.push(name.raw());
        payload.push(super::to_u32(args.len()));
        let mut flags = TypeFlags::IS_CLASS;
        for &arg in args {
            payload.push(arg.raw());
            flags |= self.flags(arg).propagated();
        }
        self.intern_complex(Tag::Class, &payload, flags)
    }

    // === Function Constructor ===

    /// Create a function type `(params...) -> ret`.
    pub fn function(&mut self, params: &[Idx], ret: Idx) -> Idx {
        // Layout: [param_count, param0, param1, ..., return_type]
        let mut payload = Vec::with_capacity(params.len() + 2);
        payload.push(super::to_u32(params.len()));
        let mut flags = TypeFlags::IS_FUNCTION | self.flags(ret).propagated();
        for &param in params {
            payload.push(param.raw());
            flags |= self.flags(param).propagated();
        }
        payload.push(ret.raw());
        self.intern_complex(Tag::Function, &payload, flags)
    }

    // === Variables and Schemes ===

    /// Create a quantified placeholder for scheme bodies.
    ///
    /// `index` is the position of the parameter the placeholder stands
    /// for; instantiation substitutes the matching argument.
    pub fn bound_var(&mut self, index: u32) -> Idx {
        self.intern_inline(Tag::BoundVar, index, TypeFlags::HAS_BOUND_VAR)
    }

    /// Create a generic definition quantifying over `param_count`
    /// parameters.
    ///
    /// The body refers to parameters via [`bound_var`](Self::bound_var).
    /// A scheme over zero parameters is returned as the bare body.
    pub fn scheme(&mut self, param_count: u32, body: Idx) -> Idx {
        if param_count == 0 {
            return body;
        }
        // Layout: [param_count, body]
        let flags = TypeFlags::IS_SCHEME | self.flags(body).propagated();
        self.intern_complex(Tag::Scheme, &[param_count, body.raw()], flags)
    }
}
