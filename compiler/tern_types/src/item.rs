//! Compact type item storage.
//!
//! Each type in the pool is stored as an `Item` with a tag and data field.
//! The interpretation of `data` depends on the tag.

use crate::{Idx, Tag};

/// A single type item in the pool.
///
/// - `tag`: identifies the type kind (see [`Tag`])
/// - `data`: meaning depends on tag (held-type index, extra index, or
///   variable id)
#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub struct Item {
    /// Type kind discriminant.
    pub tag: Tag,
    /// Tag-dependent data field.
    pub data: u32,
}

impl Item {
    /// Create a new item with the given tag and data.
    #[inline]
    pub const fn new(tag: Tag, data: u32) -> Self {
        Self { tag, data }
    }

    /// Create a primitive type item.
    #[inline]
    pub const fn primitive(tag: Tag) -> Self {
        Self { tag, data: 0 }
    }

    /// Create a wrapper item; the held type is stored directly in `data`.
    #[inline]
    pub const fn wrapper(tag: Tag, held: Idx) -> Self {
        Self {
            tag,
            data: held.raw(),
        }
    }

    /// Create an item that references the extra array.
    #[inline]
    pub const fn with_extra(tag: Tag, extra_idx: u32) -> Self {
        Self {
            tag,
            data: extra_idx,
        }
    }

    /// Create a type variable item.
    #[inline]
    pub fn var(tag: Tag, var_id: u32) -> Self {
        debug_assert!(matches!(tag, Tag::Var | Tag::BoundVar));
        Self { tag, data: var_id }
    }

    /// Get the held-type index for wrapper items.
    #[inline]
    pub const fn held(self) -> Idx {
        Idx::from_raw(self.data)
    }

    /// Get the extra array index for complex items.
    #[inline]
    pub const fn extra_idx(self) -> usize {
        self.data as usize
    }

    /// Get the variable id for type variable items.
    #[inline]
    pub const fn var_id(self) -> u32 {
        self.data
    }
}
