//! On-demand monomorphization.
//!
//! `realize` takes a fully-unified type and produces (or returns the
//! cached) monomorphized entry for it: the canonical concrete type plus a
//! materialized constructor function node where the entity has one. A
//! type that still contains unbound variables is not an error — it is
//! deferred, and the fixpoint loop will try again after more unification
//! progress.
//!
//! Entries are memoized by (entity, ordered concrete type arguments) and
//! never invalidated within a run: realizing the same key twice returns
//! the identical entry, which later passes rely on when they compare and
//! replace by id.

use tern_ir::{Name, NodeId, NodeKind, Span, TypeId};
use tern_types::{Idx, Tag};

use crate::TypeChecker;

/// Cache key for a monomorphization.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RealizeKey {
    /// The generic entity being instantiated.
    pub entity: Name,
    /// Fully resolved type arguments, in order.
    pub args: Vec<Idx>,
}

/// A memoized monomorphization.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Realized {
    /// The canonical concrete type.
    pub ty: Idx,
    /// The materialized constructor node, for entities that have one.
    pub construct: Option<NodeId>,
}

/// Outcome of a realization attempt.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Realize {
    /// Fully concrete; the entry is (now) in the cache.
    Ready(Realized),
    /// Unbound variables remain; try again after more unification.
    Deferred,
}

impl TypeChecker<'_> {
    /// Attempt to realize `ty`.
    ///
    /// Returns [`Realize::Deferred`] while any variable reachable from
    /// `ty` is unbound. Otherwise canonicalizes the term, memoizes the
    /// monomorphization, and returns the cached entry — the same entry,
    /// by identity, on every subsequent call with an equal key.
    pub fn realize(&mut self, ty: Idx) -> Realize {
        if self.pool.contains_unbound(ty) {
            return Realize::Deferred;
        }
        let canonical = self.pool.resolve_full(ty);

        let (entity, args) = match self.pool.tag(canonical) {
            Tag::Optional => (self.ctx.builtins.optional, vec![self.pool.held(canonical)]),
            Tag::Union => (self.ctx.builtins.union, vec![self.pool.held(canonical)]),
            Tag::Class => (
                self.pool.class_name(canonical),
                self.pool.class_args(canonical),
            ),
            // Scalars and function types need no materialized constructor.
            _ => {
                return Realize::Ready(Realized {
                    ty: canonical,
                    construct: None,
                })
            }
        };

        let key = RealizeKey { entity, args };
        if let Some(entry) = self.ctx.realization_get(&key) {
            return Realize::Ready(entry);
        }

        tracing::debug!(?canonical, "realizing monomorphized constructor");
        let construct = self.materialize_constructor(entity, canonical);
        let entry = Realized {
            ty: canonical,
            construct: Some(construct),
        };
        Realize::Ready(self.ctx.realization_insert_if_absent(key, entry))
    }

    /// Build the concrete constructor function node for one
    /// instantiation of a generic entity.
    ///
    /// The node is synthesized fully resolved: the code generator treats
    /// bodiless functions as intrinsics.
    fn materialize_constructor(&mut self, entity: Name, canonical: Idx) -> NodeId {
        let rendered = self.pool.display(canonical, self.interner);
        let base = self.interner.resolve(entity).unwrap_or_default();
        let name = self.interner.intern(&format!("{base}.new:{rendered}"));

        let func_ty = self.pool.function(&[], canonical);
        let node = self.arena.push(
            NodeKind::Func {
                params: Vec::new(),
                body: None,
            },
            name,
            Span::DUMMY,
        );
        self.arena.set_ty(node, TypeId::from_raw(func_ty.raw()));
        self.arena.set_done(node);
        node
    }
}
