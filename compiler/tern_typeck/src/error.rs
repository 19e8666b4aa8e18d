//! Diagnostic construction for type errors.
//!
//! Classifies unification failures into stable error codes and attaches
//! the offending type terms as notes. User-facing errors are collected and
//! checking continues; internal invariant violations are a distinct,
//! fatal class.

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::{Span, StringInterner};
use tern_types::{Pool, UnifyError};

/// Build the diagnostic for a failed unification.
///
/// Both terms travel with the record so the driver can render them.
pub fn diagnose_unify_error(
    err: &UnifyError,
    span: Span,
    pool: &Pool,
    interner: &StringInterner,
) -> Diagnostic {
    match err {
        UnifyError::Mismatch {
            expected, found, ..
        } => Diagnostic::error(ErrorCode::TypeMismatch, err.to_string(), span)
            .with_note(format!("expected `{}`", pool.display(*expected, interner)))
            .with_note(format!("found `{}`", pool.display(*found, interner))),

        UnifyError::InfiniteType {
            containing_type, ..
        } => Diagnostic::error(ErrorCode::InfiniteType, err.to_string(), span).with_note(format!(
            "the variable would expand inside `{}`",
            pool.display(*containing_type, interner)
        )),

        UnifyError::ArityMismatch { .. } => {
            Diagnostic::error(ErrorCode::ArityMismatch, err.to_string(), span)
        }

        UnifyError::UninstantiatedScheme { scheme } => {
            Diagnostic::error(ErrorCode::InternalError, err.to_string(), span).with_note(format!(
                "scheme `{}`",
                pool.display(*scheme, interner)
            ))
        }
    }
}

/// Build the diagnostic for a node whose type never resolved within the
/// fixpoint budget.
pub fn diagnose_unresolved(span: Span, pool: &Pool, interner: &StringInterner, ty: Option<tern_types::Idx>) -> Diagnostic {
    let diag = Diagnostic::error(
        ErrorCode::UnresolvedType,
        "type could not be resolved",
        span,
    );
    match ty {
        Some(ty) => diag.with_note(format!(
            "best known type is `{}`",
            pool.display(ty, interner)
        )),
        None => diag,
    }
}
