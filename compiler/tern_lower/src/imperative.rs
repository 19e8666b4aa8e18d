//! Imperative for-loop lowering.
//!
//! Rewrites the high-level `For` construct into primitive control flow:
//!
//! ```text
//! for x in xs { body }
//! ```
//!
//! becomes
//!
//! ```text
//! {
//!     it = iterator(xs)
//!     while has_next(it) {
//!         x = next(it)
//!         body
//!     }
//! }
//! ```
//!
//! The iterator protocol functions are synthesized as typed intrinsics.
//! Runs on fully typed IR: the iterable's type has already unified with
//! `Iterator[elem]`, so every synthesized node gets a concrete type.

use tern_ir::{Name, NodeId, NodeKind, Span, TypeId, VarScope};
use tern_types::{Idx, Pool, UnifyEngine};

use crate::pass::{OperatorPass, RewriteCx};

/// Lowers `For` nodes to iterator/has-next/next primitives.
pub struct ImperativeForLowering;

impl ImperativeForLowering {
    /// Stable pass key.
    pub const KEY: &'static str = "imperative-for-lowering";
}

impl OperatorPass for ImperativeForLowering {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn handle(&mut self, cx: &mut RewriteCx<'_>, id: NodeId) -> Option<NodeId> {
        let &NodeKind::For { iter, var, body } = cx.arena.kind(id) else {
            return None;
        };

        let span = cx.arena.span(id);
        let iter_ty = resolved_slot(cx.pool, cx.arena.ty(iter));
        let elem_ty = resolved_slot(cx.pool, cx.arena.ty(var));

        tracing::debug!(?id, "lowering imperative for");

        // it = iterator(xs)
        let it_name = iterator_var_name(cx, var);
        let it_var = push_typed(cx, NodeKind::Var { scope: VarScope::Local }, it_name, span, iter_ty);
        let get_iter = intrinsic(cx, "iterator", &[iter_ty], iter_ty, span);
        let get_call = push_typed(
            cx,
            NodeKind::Call {
                callee: get_iter,
                args: vec![iter],
            },
            Name::EMPTY,
            span,
            iter_ty,
        );
        let init = push_typed(
            cx,
            NodeKind::Assign {
                var: it_var,
                value: get_call,
            },
            Name::EMPTY,
            span,
            Idx::UNIT,
        );

        // while has_next(it)
        let has_next = intrinsic(cx, "has_next", &[iter_ty], Idx::BOOL, span);
        let it_read_cond = push_typed(
            cx,
            NodeKind::VarRef { var: it_var },
            Name::EMPTY,
            span,
            iter_ty,
        );
        let cond = push_typed(
            cx,
            NodeKind::Call {
                callee: has_next,
                args: vec![it_read_cond],
            },
            Name::EMPTY,
            span,
            Idx::BOOL,
        );

        // x = next(it)
        let next = intrinsic(cx, "next", &[iter_ty], elem_ty, span);
        let it_read_next = push_typed(
            cx,
            NodeKind::VarRef { var: it_var },
            Name::EMPTY,
            span,
            iter_ty,
        );
        let next_call = push_typed(
            cx,
            NodeKind::Call {
                callee: next,
                args: vec![it_read_next],
            },
            Name::EMPTY,
            span,
            elem_ty,
        );
        let bind = push_typed(
            cx,
            NodeKind::Assign {
                var,
                value: next_call,
            },
            Name::EMPTY,
            span,
            Idx::UNIT,
        );

        let loop_body = push_typed(
            cx,
            NodeKind::Block {
                body: vec![bind, body],
            },
            Name::EMPTY,
            span,
            Idx::UNIT,
        );
        let while_node = push_typed(
            cx,
            NodeKind::While {
                cond,
                body: loop_body,
            },
            Name::EMPTY,
            span,
            Idx::UNIT,
        );
        let lowered = push_typed(
            cx,
            NodeKind::Block {
                body: vec![init, while_node],
            },
            Name::EMPTY,
            span,
            Idx::UNIT,
        );

        Some(lowered)
    }
}

/// Resolve a node's type slot to its canonical pool form.
fn resolved_slot(pool: &mut Pool, slot: TypeId) -> Idx {
    if slot.is_valid() {
        let idx = Idx::from_raw(slot.raw());
        let resolved = UnifyEngine::new(pool).resolve(idx);
        pool.resolve_full(resolved)
    } else {
        Idx::UNIT
    }
}

/// Name the synthesized iterator variable after the loop variable.
fn iterator_var_name(cx: &mut RewriteCx<'_>, var: NodeId) -> Name {
    let base = cx
        .interner
        .resolve(cx.arena.name(var))
        .unwrap_or_default();
    cx.interner.intern(&format!("{base}.iter"))
}

/// Synthesize a typed, bodiless protocol function.
fn intrinsic(
    cx: &mut RewriteCx<'_>,
    name: &str,
    params: &[Idx],
    ret: Idx,
    span: Span,
) -> NodeId {
    let func_ty = cx.pool.function(params, ret);
    let name = cx.interner.intern(name);
    push_typed(
        cx,
        NodeKind::Func {
            params: Vec::new(),
            body: None,
        },
        name,
        span,
        func_ty,
    )
}

/// Push a node that is born fully resolved.
fn push_typed(cx: &mut RewriteCx<'_>, kind: NodeKind, name: Name, span: Span, ty: Idx) -> NodeId {
    let id = cx.arena.push(kind, name, span);
    cx.arena.set_ty(id, TypeId::from_raw(ty.raw()));
    cx.arena.set_done(id);
    id
}
