//! Typecheck context.
//!
//! One per compilation unit: the lexical scope chain, the canonical
//! name-to-type table, and the realization cache. The context is torn
//! down after checking; its results survive in the IR's type slots and in
//! the realized constructor nodes.

use rustc_hash::FxHashMap;
use tern_ir::{Name, StringInterner};
use tern_types::{Idx, Pool};

use crate::realize::{RealizeKey, Realized};

/// Canonical names the checker needs at hand.
#[derive(Copy, Clone, Debug)]
pub struct Builtins {
    /// The generic `Optional` wrapper definition.
    pub optional: Name,
    /// The generic `Union` wrapper definition.
    pub union: Name,
    /// The generic `Iterator` class, used by for-loop typing.
    pub iterator: Name,
}

/// Run-scoped mutable state for type checking.
pub struct Context {
    /// Lexical scope chain, innermost last.
    scopes: Vec<FxHashMap<Name, Idx>>,
    /// Canonical name → known type.
    types: FxHashMap<Name, Idx>,
    /// Memoized monomorphizations.
    realizations: FxHashMap<RealizeKey, Realized>,
    /// Pre-interned builtin names.
    pub builtins: Builtins,
}

impl Context {
    /// Create a context seeded with the builtin types.
    pub fn new(interner: &StringInterner, pool: &mut Pool) -> Self {
        let mut types = FxHashMap::default();
        types.insert(interner.intern("bool"), Idx::BOOL);
        types.insert(interner.intern("int"), Idx::INT);
        types.insert(interner.intern("float"), Idx::FLOAT);
        types.insert(interner.intern("str"), Idx::STR);
        types.insert(interner.intern("unit"), Idx::UNIT);

        let optional = interner.intern("Optional");
        let union = interner.intern("Union");
        let iterator = interner.intern("Iterator");

        // Optional and Union are single-parameter wrapper definitions;
        // Iterator is a single-parameter nominal class.
        let hole = pool.bound_var(0);
        let optional_body = pool.optional(hole);
        let optional_scheme = pool.scheme(1, optional_body);
        types.insert(optional, optional_scheme);

        let union_body = pool.union(hole);
        let union_scheme = pool.scheme(1, union_body);
        types.insert(union, union_scheme);

        let iterator_body = pool.class(iterator, &[hole]);
        let iterator_scheme = pool.scheme(1, iterator_body);
        types.insert(iterator, iterator_scheme);

        Context {
            scopes: vec![FxHashMap::default()],
            types,
            realizations: FxHashMap::default(),
            builtins: Builtins {
                optional,
                union,
                iterator,
            },
        }
    }

    // === Scopes ===

    /// Enter a lexical scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Leave the innermost lexical scope.
    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "cannot pop the module scope");
        self.scopes.pop();
    }

    /// Bind a name in the innermost scope.
    pub fn bind(&mut self, name: Name, ty: Idx) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, ty);
        }
    }

    /// Resolve a name, innermost scope first.
    pub fn lookup(&self, name: Name) -> Option<Idx> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).copied())
    }

    // === Canonical types ===

    /// Resolve a canonical type name (`get_type`).
    pub fn get_type(&self, name: Name) -> Option<Idx> {
        self.types.get(&name).copied()
    }

    /// Register a canonical type name.
    pub fn register_type(&mut self, name: Name, ty: Idx) {
        self.types.insert(name, ty);
    }

    // === Realization cache ===

    /// Look up a memoized realization.
    pub(crate) fn realization_get(&self, key: &RealizeKey) -> Option<Realized> {
        self.realizations.get(key).copied()
    }

    /// Insert a computed realization unless one is already present, and
    /// return the cached winner either way.
    ///
    /// At-most-once per key: a racing duplicate compute can never publish
    /// a second result.
    pub(crate) fn realization_insert_if_absent(
        &mut self,
        key: RealizeKey,
        entry: Realized,
    ) -> Realized {
        *self.realizations.entry(key).or_insert(entry)
    }

    /// Number of memoized realizations.
    pub fn realization_count(&self) -> usize {
        self.realizations.len()
    }
}
