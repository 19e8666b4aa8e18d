//! Pre-computed type metadata flags.
//!
//! `TypeFlags` are computed once at intern time and cached, enabling O(1)
//! queries about type properties without traversal. Used to gate the
//! occurs check and realization-readiness tests.
//!
//! Note: `HAS_VAR` means the term *structurally contains* a variable. The
//! variable may later be bound via a link; whether any variable is still
//! unbound is a resolution question, answered by `Pool::contains_unbound`.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed type properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Presence flags ===
        /// Contains type variables (unification targets).
        const HAS_VAR = 1 << 0;
        /// Contains quantified placeholders (scheme bodies).
        const HAS_BOUND_VAR = 1 << 1;

        // === Category flags ===
        /// Built-in primitive type.
        const IS_PRIMITIVE = 1 << 8;
        /// Optional/union wrapper.
        const IS_WRAPPER = 1 << 9;
        /// Nominal class type.
        const IS_CLASS = 1 << 10;
        /// Function type.
        const IS_FUNCTION = 1 << 11;
        /// Generic definition (quantified).
        const IS_SCHEME = 1 << 12;
    }
}

impl TypeFlags {
    /// Presence flags that propagate from children to parents.
    pub const PROPAGATED: TypeFlags = TypeFlags::HAS_VAR.union(TypeFlags::HAS_BOUND_VAR);

    /// The child-derived subset of these flags.
    #[inline]
    pub fn propagated(self) -> TypeFlags {
        self & Self::PROPAGATED
    }
}
