//! IR node kinds.
//!
//! The set of node kinds is a closed sum type with exhaustive-match
//! dispatch: adding a kind forces every typecheck rule and lowering pass
//! to account for it at compile time.

use crate::{Name, NodeId};

/// Storage class of a variable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarScope {
    /// Function-local binding.
    Local,
    /// Function argument.
    Argument,
    /// Module-level binding.
    Global,
}

/// The kind of an IR node.
///
/// Child references are stored as [`NodeId`]s into the owning arena, never
/// as pointers. The mutation protocol on `IrArena` rewrites exactly these
/// slots.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The `none` literal (empty optional).
    NoneLit,
    /// Boolean literal.
    BoolLit(bool),
    /// Integer literal.
    IntLit(i64),
    /// Float literal.
    FloatLit(f64),
    /// String literal (interned content).
    StrLit(Name),

    /// Named storage location: local, argument, or global.
    Var {
        /// Storage class.
        scope: VarScope,
    },

    /// Read of a storage location.
    VarRef {
        /// The variable being read.
        var: NodeId,
    },

    /// Write of a value into a storage location.
    Assign {
        /// The variable being written.
        var: NodeId,
        /// The value written.
        value: NodeId,
    },

    /// Function call.
    Call {
        /// The callee value.
        callee: NodeId,
        /// Positional arguments.
        args: Vec<NodeId>,
    },

    /// Function value.
    ///
    /// `body` is `None` for intrinsics (e.g. realized constructors whose
    /// implementation is supplied by the code generator).
    Func {
        /// Parameter variables, in order.
        params: Vec<NodeId>,
        /// Function body, if any.
        body: Option<NodeId>,
    },

    /// Ordered sequence of nodes.
    Block {
        /// The nodes, executed in order.
        body: Vec<NodeId>,
    },

    /// Conditional flow.
    If {
        /// Condition (must type to `bool`).
        cond: NodeId,
        /// Taken when the condition holds.
        then_body: NodeId,
        /// Taken otherwise, if present.
        else_body: Option<NodeId>,
    },

    /// Primitive loop flow.
    While {
        /// Condition (must type to `bool`).
        cond: NodeId,
        /// Loop body.
        body: NodeId,
    },

    /// High-level iteration flow.
    ///
    /// Lowered to iterator/has-next/next primitives before code
    /// generation; never reaches the code generator.
    For {
        /// The iterable value.
        iter: NodeId,
        /// Loop variable bound to each element.
        var: NodeId,
        /// Loop body.
        body: NodeId,
    },
}

impl NodeKind {
    /// Is this node a storage variable (as opposed to a computed value)?
    #[inline]
    pub fn is_var(&self) -> bool {
        matches!(self, NodeKind::Var { .. })
    }

    /// Is this node a literal?
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::NoneLit
                | NodeKind::BoolLit(_)
                | NodeKind::IntLit(_)
                | NodeKind::FloatLit(_)
                | NodeKind::StrLit(_)
        )
    }
}
