//! IR arena and the mutation protocol.
//!
//! Nodes live in struct-of-arrays storage (parallel `kinds`, `names`,
//! `spans`, `types`, `done` vectors indexed by [`NodeId`]). All
//! cross-references between nodes are ids; substitution is an arena update,
//! so a node can be swapped out of every position that references it
//! without walking the whole graph by hand.
//!
//! Entries are never removed. A node replaced by a pass simply becomes
//! unreachable; its id is not reused within the arena's epoch.

use smallvec::SmallVec;

use crate::{IdAllocator, Name, NodeId, NodeKind, Span, TypeId};

/// Convert a length to u32, panicking with context on overflow.
pub(crate) fn to_u32(value: usize, what: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic!("too many {what}: {value} exceeds u32::MAX"))
}

/// Arena for IR nodes.
///
/// Owns the id allocator: node ids double as indices into the parallel
/// arrays. Constructing a fresh arena starts a fresh id epoch.
#[derive(Debug, Default)]
pub struct IrArena {
    alloc: IdAllocator,
    /// Node kinds (parallel with names, spans, types, done).
    kinds: Vec<NodeKind>,
    /// Human-readable names; `Name::EMPTY` when absent.
    names: Vec<Name>,
    /// Source spans for error reporting.
    spans: Vec<Span>,
    /// Resolved-type slots; `TypeId::INVALID` until type checking fills them.
    types: Vec<TypeId>,
    /// "Fully resolved, ready for lowering/codegen" flags.
    done: Vec<bool>,
}

impl IrArena {
    /// Create an empty arena (and a fresh id epoch).
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, returning its id.
    pub fn push(&mut self, kind: NodeKind, name: Name, span: Span) -> NodeId {
        let id = self.alloc.fresh();
        debug_assert_eq!(
            id.index(),
            self.kinds.len(),
            "allocator and arena disagree on the next id"
        );
        self.kinds.push(kind);
        self.names.push(name);
        self.spans.push(span);
        self.types.push(TypeId::INVALID);
        self.done.push(false);
        id
    }

    /// Allocate an unnamed node.
    pub fn push_unnamed(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.push(kind, Name::EMPTY, span)
    }

    /// Number of nodes allocated.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterate over all allocated ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..to_u32(self.kinds.len(), "IR nodes")).map(NodeId::new)
    }

    // === Accessors ===

    /// Get the kind of a node.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.kinds[id.index()]
    }

    /// Get the name of a node (`Name::EMPTY` when absent).
    #[inline]
    pub fn name(&self, id: NodeId) -> Name {
        self.names[id.index()]
    }

    /// Get the source span of a node.
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.spans[id.index()]
    }

    /// Get the resolved-type slot of a node.
    #[inline]
    pub fn ty(&self, id: NodeId) -> TypeId {
        self.types[id.index()]
    }

    /// Set the resolved-type slot of a node.
    #[inline]
    pub fn set_ty(&mut self, id: NodeId, ty: TypeId) {
        self.types[id.index()] = ty;
    }

    /// Check the "fully resolved" flag.
    #[inline]
    pub fn is_done(&self, id: NodeId) -> bool {
        self.done[id.index()]
    }

    /// Set the "fully resolved" flag.
    #[inline]
    pub fn set_done(&mut self, id: NodeId) {
        self.done[id.index()] = true;
    }

    // === Traversal ===

    /// All child ids of a node (value and variable slots alike), in
    /// evaluation order.
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        let mut out = SmallVec::new();
        match self.kind(id) {
            NodeKind::NoneLit
            | NodeKind::BoolLit(_)
            | NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::StrLit(_)
            | NodeKind::Var { .. } => {}
            NodeKind::VarRef { var } => out.push(*var),
            NodeKind::Assign { var, value } => {
                out.push(*var);
                out.push(*value);
            }
            NodeKind::Call { callee, args } => {
                out.push(*callee);
                out.extend(args.iter().copied());
            }
            NodeKind::Func { params, body } => {
                out.extend(params.iter().copied());
                if let Some(body) = body {
                    out.push(*body);
                }
            }
            NodeKind::Block { body } => out.extend(body.iter().copied()),
            NodeKind::If {
                cond,
                then_body,
                else_body,
            } => {
                out.push(*cond);
                out.push(*then_body);
                if let Some(else_body) = else_body {
                    out.push(*else_body);
                }
            }
            NodeKind::While { cond, body } => {
                out.push(*cond);
                out.push(*body);
            }
            NodeKind::For { iter, var, body } => {
                out.push(*iter);
                out.push(*var);
                out.push(*body);
            }
        }
        out
    }

    // === Mutation protocol ===
    //
    // The id-based forms below are the only primitive mutation entry
    // points for a node's internal references. Each rewrites exactly the
    // slots the node owns and returns the count of slots changed; 0 means
    // "reference not held here" and is a valid no-op.

    /// Replace every use of the value `old` in `node`'s value slots.
    pub fn replace_used_value(&mut self, node: NodeId, old: NodeId, new: NodeId) -> usize {
        match &mut self.kinds[node.index()] {
            NodeKind::NoneLit
            | NodeKind::BoolLit(_)
            | NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::StrLit(_)
            | NodeKind::Var { .. }
            | NodeKind::VarRef { .. } => 0,
            NodeKind::Assign { value, .. } => swap_slot(value, old, new),
            NodeKind::Call { callee, args } => {
                swap_slot(callee, old, new) + swap_slots(args, old, new)
            }
            NodeKind::Func { body, .. } => swap_opt_slot(body, old, new),
            NodeKind::Block { body } => swap_slots(body, old, new),
            NodeKind::If {
                cond,
                then_body,
                else_body,
            } => {
                swap_slot(cond, old, new)
                    + swap_slot(then_body, old, new)
                    + swap_opt_slot(else_body, old, new)
            }
            NodeKind::While { cond, body } => {
                swap_slot(cond, old, new) + swap_slot(body, old, new)
            }
            NodeKind::For { iter, body, .. } => {
                swap_slot(iter, old, new) + swap_slot(body, old, new)
            }
        }
    }

    /// Replace every use of the variable `old` in `node`'s variable slots.
    pub fn replace_used_variable(&mut self, node: NodeId, old: NodeId, new: NodeId) -> usize {
        match &mut self.kinds[node.index()] {
            NodeKind::VarRef { var }
            | NodeKind::Assign { var, .. }
            | NodeKind::For { var, .. } => swap_slot(var, old, new),
            NodeKind::Func { params, .. } => swap_slots(params, old, new),
            NodeKind::NoneLit
            | NodeKind::BoolLit(_)
            | NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::StrLit(_)
            | NodeKind::Var { .. }
            | NodeKind::Call { .. }
            | NodeKind::Block { .. }
            | NodeKind::If { .. }
            | NodeKind::While { .. } => 0,
        }
    }

    /// Replace `node`'s resolved-type slot if it currently holds `old`.
    pub fn replace_used_type(&mut self, node: NodeId, old: TypeId, new: TypeId) -> usize {
        let slot = &mut self.types[node.index()];
        if *slot == old {
            *slot = new;
            1
        } else {
            0
        }
    }
}

fn swap_slot(slot: &mut NodeId, old: NodeId, new: NodeId) -> usize {
    if *slot == old {
        *slot = new;
        1
    } else {
        0
    }
}

fn swap_opt_slot(slot: &mut Option<NodeId>, old: NodeId, new: NodeId) -> usize {
    match slot {
        Some(held) if *held == old => {
            *slot = Some(new);
            1
        }
        _ => 0,
    }
}

fn swap_slots(slots: &mut [NodeId], old: NodeId, new: NodeId) -> usize {
    slots.iter_mut().map(|slot| swap_slot(slot, old, new)).sum()
}
