//! Diagnostic queue.
//!
//! The emission boundary between the middle end and the driver: passes
//! push structured records here and keep going; the driver drains the
//! queue after each phase.

use crate::{Diagnostic, Severity};

/// Collected diagnostics for one compilation run.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Error {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of error-severity diagnostics recorded.
    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Check if any error has been recorded.
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// All recorded diagnostics, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        std::mem::take(&mut self.diagnostics)
    }
}
