//! Type checker for the Tern compiler.
//!
//! Assigns and unifies a type for every IR node, instantiating generics
//! per use site and monomorphizing ("realizing") instantiations on
//! demand. Because forward references and generics defeat any single
//! traversal order, the visitor runs to a fixpoint: repeated passes
//! accumulate unification results in the [`Context`] until no node's
//! done flag newly flips.
//!
//! # Main Entry Points
//!
//! - [`typecheck`]: fixpoint driver over a set of roots
//! - [`TypeChecker`]: the per-pass visitor
//! - [`Context`]: run-scoped scope chain, type table, realization cache

mod checker;
mod context;
mod error;
mod fixpoint;
mod realize;
mod stack;

pub use checker::TypeChecker;
pub use context::{Builtins, Context};
pub use error::{diagnose_unify_error, diagnose_unresolved};
pub use fixpoint::{typecheck, TypecheckOptions};
pub use realize::{Realize, RealizeKey, Realized};
pub use stack::ensure_sufficient_stack;
