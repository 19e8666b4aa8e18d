//! Unified type index handle.
//!
//! `Idx` is the canonical type representation: all types are stored in the
//! pool and referenced by their 32-bit index. Equality of interned
//! (non-variable) types is O(1) index comparison.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-4) ===
    // Pre-interned at pool creation for O(1) access.

    /// The `bool` type.
    pub const BOOL: Self = Self(0);
    /// The `int` type (64-bit signed integer).
    pub const INT: Self = Self(1);
    /// The `float` type (64-bit floating point).
    pub const FLOAT: Self = Self(2);
    /// The `str` type (UTF-8 string).
    pub const STR: Self = Self(3);
    /// The unit type (statements, flows).
    pub const UNIT: Self = Self(4);

    /// First index for dynamically interned types.
    pub const FIRST_DYNAMIC: u32 = 8;

    /// Sentinel value indicating no type / invalid index.
    pub const NONE: Self = Self(u32::MAX);

    /// Create from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Idx(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index into the pool's item array.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a valid index.
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this index is a pre-interned primitive.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Idx::BOOL => write!(f, "Idx::BOOL"),
            Idx::INT => write!(f, "Idx::INT"),
            Idx::FLOAT => write!(f, "Idx::FLOAT"),
            Idx::STR => write!(f, "Idx::STR"),
            Idx::UNIT => write!(f, "Idx::UNIT"),
            Idx::NONE => write!(f, "Idx::NONE"),
            Idx(raw) => write!(f, "Idx({raw})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_below_dynamic_range() {
        assert!(Idx::BOOL.is_primitive());
        assert!(Idx::UNIT.is_primitive());
        assert!(!Idx::from_raw(Idx::FIRST_DYNAMIC).is_primitive());
    }

    #[test]
    fn none_is_not_some() {
        assert!(!Idx::NONE.is_some());
        assert!(Idx::INT.is_some());
    }
}
