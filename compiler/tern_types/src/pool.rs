//! The type pool.
//!
//! All types live in one pool: compact `Item` cells plus an extra array
//! for variable-length payloads. Non-variable types are hash-consed, so
//! structural equality of interned types is index equality. Type variables
//! are never interned; each `fresh_var` is a distinct unification target.

use rustc_hash::FxHashMap;
use tern_ir::Name;

use crate::{Idx, Item, Tag, TypeFlags, VarState};

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic!("type pool exceeded u32::MAX entries: {value}"))
}

/// Unified type storage.
pub struct Pool {
    /// Compact type cells (parallel with `flags`).
    items: Vec<Item>,
    /// Variable-length payloads for complex types.
    extra: Vec<u32>,
    /// Pre-computed metadata (parallel with `items`).
    flags: Vec<TypeFlags>,
    /// States of type variables, indexed by var id.
    var_states: Vec<VarState>,
    /// Hash-consing table for non-variable types.
    interned: FxHashMap<(Tag, Vec<u32>), Idx>,
}

impl Pool {
    /// Create a pool with the primitives pre-interned at their fixed
    /// indices.
    pub fn new() -> Self {
        let mut pool = Pool {
            items: Vec::with_capacity(64),
            extra: Vec::new(),
            flags: Vec::new(),
            var_states: Vec::new(),
            interned: FxHashMap::default(),
        };

        for tag in [Tag::Bool, Tag::Int, Tag::Float, Tag::Str, Tag::Unit] {
            let idx = pool.push_item(Item::primitive(tag), TypeFlags::IS_PRIMITIVE);
            pool.interned.insert((tag, Vec::new()), idx);
        }
        debug_assert_eq!(pool.items.len(), 5);

        // Reserved primitive slots up to FIRST_DYNAMIC. Never handed out:
        // the (tag, payload) table already maps the primitives above.
        while pool.items.len() < Idx::FIRST_DYNAMIC as usize {
            pool.push_item(Item::primitive(Tag::Unit), TypeFlags::IS_PRIMITIVE);
        }

        pool
    }

    fn push_item(&mut self, item: Item, flags: TypeFlags) -> Idx {
        let idx = Idx::from_raw(to_u32(self.items.len()));
        self.items.push(item);
        self.flags.push(flags);
        idx
    }

    /// Intern a type whose whole payload fits in the data field.
    pub(crate) fn intern_inline(&mut self, tag: Tag, data: u32, flags: TypeFlags) -> Idx {
        let key = (tag, vec![data]);
        if let Some(&idx) = self.interned.get(&key) {
            return idx;
        }
        let idx = self.push_item(Item::new(tag, data), flags);
        self.interned.insert(key, idx);
        idx
    }

    /// Intern a type whose payload lives in the extra array.
    pub(crate) fn intern_complex(&mut self, tag: Tag, payload: &[u32], flags: TypeFlags) -> Idx {
        let key = (tag, payload.to_vec());
        if let Some(&idx) = self.interned.get(&key) {
            return idx;
        }
        let extra_idx = to_u32(self.extra.len());
        self.extra.extend_from_slice(payload);
        let idx = self.push_item(Item::with_extra(tag, extra_idx), flags);
        self.interned.insert(key, idx);
        idx
    }

    // === Accessors ===

    /// Number of type cells (including reserved primitive slots).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: primitives are pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get the tag of a type.
    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.items[idx.index()].tag
    }

    /// Get the raw data field of a type.
    #[inline]
    pub fn data(&self, idx: Idx) -> u32 {
        self.items[idx.index()].data
    }

    /// Get the pre-computed flags of a type.
    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.flags[idx.index()]
    }

    /// Get the held type of a wrapper (Optional/Union).
    #[inline]
    pub fn held(&self, idx: Idx) -> Idx {
        debug_assert!(self.tag(idx).is_wrapper());
        self.items[idx.index()].held()
    }

    /// Get the name of a class type.
    pub fn class_name(&self, idx: Idx) -> Name {
        debug_assert_eq!(self.tag(idx), Tag::Class);
        let at = self.items[idx.index()].extra_idx();
        Name::from_raw(self.extra[at])
    }

    /// Get the generic arguments of a class type, in order.
    pub fn class_args(&self, idx: Idx) -> Vec<Idx> {
        debug_assert_eq!(self.tag(idx), Tag::Class);
        let at = self.items[idx.index()].extra_idx();
        let count = self.extra[at + 1] as usize;
        self.extra[at + 2..at + 2 + count]
            .iter()
            .map(|&raw| Idx::from_raw(raw))
            .collect()
    }

    /// Get the parameter types of a function type, in order.
    pub fn function_params(&self, idx: Idx) -> Vec<Idx> {
        debug_assert_eq!(self.tag(idx), Tag::Function);
        let at = self.items[idx.index()].extra_idx();
        let count = self.extra[at] as usize;
        self.extra[at + 1..at + 1 + count]
            .iter()
            .map(|&raw| Idx::from_raw(raw))
            .collect()
    }

    /// Get the return type of a function type.
    pub fn function_return(&self, idx: Idx) -> Idx {
        debug_assert_eq!(self.tag(idx), Tag::Function);
        let at = self.items[idx.index()].extra_idx();
        let count = self.extra[at] as usize;
        Idx::from_raw(self.extra[at + 1 + count])
    }

    /// Get the number of parameters a scheme quantifies over.
    pub fn scheme_param_count(&self, idx: Idx) -> u32 {
        debug_assert_eq!(self.tag(idx), Tag::Scheme);
        let at = self.items[idx.index()].extra_idx();
        self.extra[at]
    }

    /// Get the body of a scheme.
    pub fn scheme_body(&self, idx: Idx) -> Idx {
        debug_assert_eq!(self.tag(idx), Tag::Scheme);
        let at = self.items[idx.index()].extra_idx();
        Idx::from_raw(self.extra[at + 1])
    }

    // === Type variables ===

    /// Create a fresh unbound type variable.
    pub fn fresh_var(&mut self) -> Idx {
        self.fresh_var_inner(None)
    }

    /// Create a fresh unbound type variable carrying a source-level name.
    pub fn fresh_named_var(&mut self, name: Name) -> Idx {
        self.fresh_var_inner(Some(name))
    }

    fn fresh_var_inner(&mut self, name: Option<Name>) -> Idx {
        let var_id = to_u32(self.var_states.len());
        self.var_states.push(VarState::Unbound { name });
        self.push_item(Item::var(Tag::Var, var_id), TypeFlags::HAS_VAR)
    }

    /// Get the state of a type variable.
    #[inline]
    pub fn var_state(&self, var_id: u32) -> &VarState {
        &self.var_states[var_id as usize]
    }

    /// Get mutable access to the state of a type variable.
    #[inline]
    pub fn var_state_mut(&mut self, var_id: u32) -> &mut VarState {
        &mut self.var_states[var_id as usize]
    }

    // === Resolution queries ===

    /// Check if any variable reachable from `idx` is still unbound.
    ///
    /// Flag-gated: types with no variables skip the traversal entirely.
    /// Follows links without mutating.
    pub fn contains_unbound(&self, idx: Idx) -> bool {
        if !self.flags(idx).contains(TypeFlags::HAS_VAR) {
            return false;
        }
        match self.tag(idx) {
            Tag::Var => match self.var_state(self.data(idx)) {
                VarState::Unbound { .. } => true,
                VarState::Link { target } => self.contains_unbound(*target),
            },
            Tag::Optional | Tag::Union => self.contains_unbound(self.held(idx)),
            Tag::Class => self
                .class_args(idx)
                .iter()
                .any(|&arg| self.contains_unbound(arg)),
            Tag::Function => {
                self.function_params(idx)
                    .iter()
                    .any(|&param| self.contains_unbound(param))
                    || self.contains_unbound(self.function_return(idx))
            }
            Tag::Scheme => self.contains_unbound(self.scheme_body(idx)),
            Tag::Bool | Tag::Int | Tag::Float | Tag::Str | Tag::Unit | Tag::BoundVar => false,
        }
    }

    /// Rebuild `idx` with every bound variable replaced by its target.
    ///
    /// The result is the canonical structural form of the term: two terms
    /// that unified to the same shape rebuild to the same index. Unbound
    /// variables are left in place.
    pub fn resolve_full(&mut self, idx: Idx) -> Idx {
        if !self.flags(idx).contains(TypeFlags::HAS_VAR) {
            return idx;
        }
        match self.tag(idx) {
            Tag::Var => match self.var_state(self.data(idx)) {
                VarState::Link { target } => {
                    let target = *target;
                    self.resolve_full(target)
                }
                VarState::Unbound { .. } => idx,
            },
            Tag::Optional => {
                let held = self.held(idx);
                let resolved = self.resolve_full(held);
                if resolved == held {
                    idx
                } else {
                    self.optional(resolved)
                }
            }
            Tag::Union => {
                let held = self.held(idx);
                let resolved = self.resolve_full(held);
                if resolved == held {
                    idx
                } else {
                    self.union(resolved)
                }
            }
            Tag::Class => {
                let name = self.class_name(idx);
                let args = self.class_args(idx);
                let mut resolved = Vec::with_capacity(args.len());
                for arg in &args {
                    resolved.push(self.resolve_full(*arg));
                }
                if resolved == args {
                    idx
                } else {
                    self.class(name, &resolved)
                }
            }
            Tag::Function => {
                let params = self.function_params(idx);
                let ret = self.function_return(idx);
                let mut resolved_params = Vec::with_capacity(params.len());
                for param in &params {
                    resolved_params.push(self.resolve_full(*param));
                }
                let resolved_ret = self.resolve_full(ret);
                if resolved_params == params && resolved_ret == ret {
                    idx
                } else {
                    self.function(&resolved_params, resolved_ret)
                }
            }
            Tag::Scheme => {
                let count = self.scheme_param_count(idx);
                let body = self.scheme_body(idx);
                let resolved = self.resolve_full(body);
                if resolved == body {
                    idx
                } else {
                    self.scheme(count, resolved)
                }
            }
            Tag::Bool | Tag::Int | Tag::Float | Tag::Str | Tag::Unit | Tag::BoundVar => idx,
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

mod construct;
mod format;

#[cfg(test)]
mod tests;
