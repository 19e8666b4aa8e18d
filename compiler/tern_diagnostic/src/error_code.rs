//! Stable error codes.
//!
//! Codes give every diagnostic a searchable identity independent of the
//! message text.

use std::fmt;

/// Stable, searchable error code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Two type terms could not be made equal.
    TypeMismatch,
    /// A type variable would occur in its own definition.
    InfiniteType,
    /// Wrong number of arguments or type arguments.
    ArityMismatch,
    /// The fixpoint budget ran out before a node's type resolved.
    UnresolvedType,
    /// Internal invariant violation; a compiler bug, not a user error.
    InternalError,
}

impl ErrorCode {
    /// The canonical `E`-prefixed code string.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::TypeMismatch => "E0001",
            ErrorCode::InfiniteType => "E0002",
            ErrorCode::ArityMismatch => "E0003",
            ErrorCode::UnresolvedType => "E0004",
            ErrorCode::InternalError => "E0005",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
