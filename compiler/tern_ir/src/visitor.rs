//! IR visitor.
//!
//! Generic read-only traversal over the arena-allocated IR. Override
//! `visit_node` to add behavior at specific nodes; call [`walk_node`] to
//! continue into children. The visitor can mutate its own state; the IR
//! stays immutable.

use crate::{IrArena, NodeId};

/// Read-only IR visitor.
pub trait Visitor {
    /// Visit a node.
    ///
    /// The default implementation walks into the node's children.
    fn visit_node(&mut self, id: NodeId, arena: &IrArena) {
        walk_node(self, id, arena);
    }
}

/// Visit all children of `id`, in evaluation order.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, id: NodeId, arena: &IrArena) {
    for child in arena.children(id) {
        visitor.visit_node(child, arena);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeKind, Span};

    struct CountLiterals {
        count: usize,
    }

    impl Visitor for CountLiterals {
        fn visit_node(&mut self, id: NodeId, arena: &IrArena) {
            if arena.kind(id).is_literal() {
                self.count += 1;
            }
            walk_node(self, id, arena);
        }
    }

    #[test]
    fn walks_nested_structure() {
        let mut arena = IrArena::new();
        let a = arena.push_unnamed(NodeKind::IntLit(1), Span::DUMMY);
        let b = arena.push_unnamed(NodeKind::IntLit(2), Span::DUMMY);
        let inner = arena.push_unnamed(NodeKind::Block { body: vec![a, b] }, Span::DUMMY);
        let c = arena.push_unnamed(NodeKind::BoolLit(true), Span::DUMMY);
        let outer = arena.push_unnamed(NodeKind::Block { body: vec![inner, c] }, Span::DUMMY);

        let mut counter = CountLiterals { count: 0 };
        counter.visit_node(outer, &arena);
        assert_eq!(counter.count, 3);
    }
}
