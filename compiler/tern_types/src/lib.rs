//! Type system for the Tern compiler.
//!
//! All types live in a unified [`Pool`] and are referenced by 32-bit
//! [`Idx`] handles:
//! - Primitive types have fixed indices for O(1) lookup
//! - Non-variable types are hash-consed, so equality of interned types
//!   is index comparison
//! - Type variables are link-based unification targets; binding stores a
//!   link, resolution follows links with path compression
//!
//! [`UnifyEngine`] merges type terms; `Pool::instantiate` turns generic
//! definitions into usable terms.

mod flags;
mod idx;
mod instantiate;
mod item;
mod pool;
mod tag;
mod unify;
mod var_state;

pub use flags::TypeFlags;
pub use idx::Idx;
pub use item::Item;
pub use pool::Pool;
pub use tag::Tag;
pub use unify::{ArityKind, UnifyContext, UnifyEngine, UnifyError};
pub use var_state::VarState;

// Size assertions to prevent accidental regressions: Idx and Item sit on
// the hot path of every unification.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Idx, Item, Tag};
    tern_ir::static_assert_size!(Idx, 4);
    tern_ir::static_assert_size!(Item, 8);
    tern_ir::static_assert_size!(Tag, 1);
}
