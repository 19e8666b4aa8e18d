//! Intermediate representation for the Tern compiler.
//!
//! Core pieces:
//! - [`NodeId`]: 4-byte handles into the arena; ids are process-unique
//!   within one allocator epoch and are never reused
//! - [`IrArena`]: struct-of-arrays node storage; all cross-references are
//!   ids, so substitution is an arena update rather than a graph walk
//! - The mutation protocol (`replace_used_value` / `replace_used_type` /
//!   `replace_used_variable`): the only primitive entry points for
//!   rewriting a node's internal references
//! - [`StringInterner`] / [`Name`]: compact interned identifiers

mod arena;
mod id_alloc;
mod interner;
mod name;
mod node;
mod node_id;
mod span;
mod type_id;
mod visitor;

pub use arena::IrArena;
pub use id_alloc::IdAllocator;
pub use interner::StringInterner;
pub use name::Name;
pub use node::{NodeKind, VarScope};
pub use node_id::NodeId;
pub use span::Span;
pub use type_id::TypeId;
pub use visitor::{walk_node, Visitor};

/// Assert the size of a type at compile time.
///
/// Guards the hot handle types against accidental growth.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, NodeId, Span, TypeId};
    static_assert_size!(NodeId, 4);
    static_assert_size!(TypeId, 4);
    static_assert_size!(Name, 4);
    static_assert_size!(Span, 8);
}
