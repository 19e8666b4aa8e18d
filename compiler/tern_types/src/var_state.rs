//! Type variable states.
//!
//! Unification is link-based: binding a variable stores a link to its
//! target instead of maintaining a substitution map. Resolution follows
//! links, compressing paths as it goes.

use tern_ir::Name;

use crate::Idx;

/// State of a type variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VarState {
    /// Not yet unified with anything.
    Unbound {
        /// Optional source-level name (from a generic parameter).
        name: Option<Name>,
    },
    /// Unified: the variable now stands for `target`.
    Link {
        /// The unification target.
        target: Idx,
    },
}

impl VarState {
    /// Check if the variable is still unbound.
    #[inline]
    pub fn is_unbound(&self) -> bool {
        matches!(self, VarState::Unbound { .. })
    }
}
