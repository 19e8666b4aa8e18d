//! Lowering errors.
//!
//! These are internal-error class: a pass tripping one means a compiler
//! bug, not a problem with the user's program. They are fatal to the
//! compilation run and surface as internal-error diagnostics, distinct
//! from user-facing type errors.

use std::fmt;

use tern_ir::NodeId;

/// Fatal error from the lowering framework.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LowerError {
    /// A substitution was requested for a reference the parent does not
    /// actually hold.
    IdentityViolation {
        /// The node that was supposed to hold the reference.
        parent: NodeId,
        /// The reference that was not found in any slot.
        child: NodeId,
    },

    /// A node references an id outside the arena.
    DanglingChild {
        /// The node holding the bad reference.
        parent: NodeId,
        /// The out-of-range id.
        child: NodeId,
    },
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerError::IdentityViolation { parent, child } => write!(
                f,
                "internal error: {parent:?} reported no slot holding {child:?} during substitution"
            ),
            LowerError::DanglingChild { parent, child } => write!(
                f,
                "internal error: {parent:?} references {child:?}, which is outside the arena"
            ),
        }
    }
}

impl std::error::Error for LowerError {}
