//! IR lowering passes for the Tern compiler.
//!
//! Rewrites high-level constructs into primitive control flow before
//! code generation. Each rewrite is an [`OperatorPass`]; the
//! [`PassManager`] runs them in a fixed, dependency-ordered sequence.
//! Rewrites go through the IR mutation protocol, so a replaced node is
//! swapped out of its parent in place and simply becomes unreachable.
//!
//! # Pipeline Position
//!
//! ```text
//! Type Check → **Lower** → code generation
//! ```

mod error;
mod imperative;
mod pass;
mod validate;

pub use error::LowerError;
pub use imperative::ImperativeForLowering;
pub use pass::{run_pass, OperatorPass, PassManager, RewriteCx};
pub use validate::{has_unlowered_for, validate};

#[cfg(test)]
mod tests;
