//! Unification error types.
//!
//! Both terms of a failed unification travel with the error so the
//! diagnostic layer can render them.

use crate::Idx;

/// Error from type unification.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnifyError {
    /// Types could not be unified.
    Mismatch {
        /// The expected type (from context).
        expected: Idx,
        /// The actual type found.
        found: Idx,
        /// Where the mismatch occurred.
        context: UnifyContext,
    },

    /// Infinite/recursive type detected (occurs check failed).
    ///
    /// Example: `a = Box[a]` creates an infinite type.
    InfiniteType {
        /// The variable that would recurse.
        var_id: u32,
        /// The type that contains the variable.
        containing_type: Idx,
    },

    /// Wrong number of parameters or type arguments.
    ArityMismatch {
        /// Expected count.
        expected: usize,
        /// Found count.
        found: usize,
        /// What kind of thing has wrong arity.
        kind: ArityKind,
    },

    /// A generic definition reached unification without instantiation.
    ///
    /// This is a compiler invariant violation, not a user error.
    UninstantiatedScheme {
        /// The offending scheme.
        scheme: Idx,
    },
}

/// What kind of construct has an arity mismatch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArityKind {
    /// Function parameter count.
    Function,
    /// Type argument count (for generics).
    TypeArgs,
}

/// Context where unification occurred.
///
/// Points error messages at the specific part of the type that failed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum UnifyContext {
    /// Top-level unification (no specific context).
    #[default]
    TopLevel,

    /// In a function parameter.
    FunctionParam {
        /// Zero-based parameter index.
        index: usize,
    },

    /// In a function return type.
    FunctionReturn,

    /// In a generic type argument.
    TypeArg {
        /// Zero-based argument index.
        index: usize,
    },

    /// Inside an optional/union wrapper.
    WrapperInner,
}

impl UnifyContext {
    /// Create a context for a function parameter.
    pub fn param(index: usize) -> Self {
        Self::FunctionParam { index }
    }

    /// Create a context for a type argument.
    pub fn type_arg(index: usize) -> Self {
        Self::TypeArg { index }
    }

    /// Get a human-readable description of this context.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "types",
            Self::FunctionParam { .. } => "function parameter",
            Self::FunctionReturn => "function return type",
            Self::TypeArg { .. } => "type argument",
            Self::WrapperInner => "wrapped type",
        }
    }
}

impl std::fmt::Display for UnifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mismatch { context, .. } => {
                write!(f, "type mismatch in {}", context.description())
            }
            Self::InfiniteType { var_id, .. } => {
                write!(
                    f,
                    "infinite type: variable ${var_id} occurs in its own definition"
                )
            }
            Self::ArityMismatch {
                expected,
                found,
                kind,
            } => {
                let kind_str = match kind {
                    ArityKind::Function => "function parameters",
                    ArityKind::TypeArgs => "type arguments",
                };
                write!(
                    f,
                    "arity mismatch: expected {expected} {kind_str}, found {found}"
                )
            }
            Self::UninstantiatedScheme { .. } => {
                write!(f, "generic definition used without instantiation")
            }
        }
    }
}

impl std::error::Error for UnifyError {}
