//! Structured diagnostics for the Tern compiler.
//!
//! The middle end reports problems as structured records — severity,
//! stable code, message, source span, supporting notes — pushed into a
//! [`DiagnosticQueue`]. Formatting and printing live outside this crate.

mod diagnostic;
mod error_code;
mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
