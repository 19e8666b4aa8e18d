//! Stack growth for deep recursion.
//!
//! Uses the `stacker` crate to ensure sufficient stack space for deeply
//! nested IR during recursive type checking.

/// Run `f`, growing the stack first if the red zone is near.
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(256 * 1024, 2 * 1024 * 1024, f)
}
