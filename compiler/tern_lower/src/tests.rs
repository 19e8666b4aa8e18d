use pretty_assertions::assert_eq;

use crate::{
    has_unlowered_for, run_pass, validate, ImperativeForLowering, OperatorPass, PassManager,
    RewriteCx,
};
use tern_ir::{IrArena, Name, NodeId, NodeKind, Span, StringInterner, TypeId, VarScope};
use tern_types::{Idx, Pool};

fn push_typed(arena: &mut IrArena, kind: NodeKind, name: Name, ty: Idx) -> NodeId {
    let id = arena.push(kind, name, Span::DUMMY);
    arena.set_ty(id, TypeId::from_raw(ty.raw()));
    arena.set_done(id);
    id
}

/// Build a fully typed `for x in xs { }` and return (arena, pool, for node).
fn typed_for(interner: &StringInterner) -> (IrArena, Pool, NodeId) {
    let mut arena = IrArena::new();
    let mut pool = Pool::new();

    let iterator_name = interner.intern("Iterator");
    let iter_int = pool.class(iterator_name, &[Idx::INT]);

    let xs = push_typed(
        &mut arena,
        NodeKind::Var {
            scope: VarScope::Local,
        },
        interner.intern("xs"),
        iter_int,
    );
    let xs_ref = push_typed(&mut arena, NodeKind::VarRef { var: xs }, Name::EMPTY, iter_int);
    let x = push_typed(
        &mut arena,
        NodeKind::Var {
            scope: VarScope::Local,
        },
        interner.intern("x"),
        Idx::INT,
    );
    let body = push_typed(
        &mut arena,
        NodeKind::Block { body: vec![] },
        Name::EMPTY,
        Idx::UNIT,
    );
    let for_node = push_typed(
        &mut arena,
        NodeKind::For {
            iter: xs_ref,
            var: x,
            body,
        },
        Name::EMPTY,
        Idx::UNIT,
    );

    (arena, pool, for_node)
}

fn reachable_ids(arena: &IrArena, root: NodeId) -> Vec<NodeId> {
    let mut seen = rustc_hash::FxHashSet::default();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if seen.insert(id) {
            stack.extend(arena.children(id));
        }
    }
    let mut ids: Vec<NodeId> = seen.into_iter().collect();
    ids.sort();
    ids
}

#[test]
fn for_lowers_into_init_plus_while() {
    let interner = StringInterner::new();
    let (mut arena, mut pool, for_node) = typed_for(&interner);

    let mut cx = RewriteCx {
        arena: &mut arena,
        pool: &mut pool,
        interner: &interner,
    };
    let mut manager = PassManager::new();
    manager.register(Box::new(ImperativeForLowering));
    let root = manager.run(&mut cx, for_node).unwrap();

    assert_ne!(root, for_node);
    assert!(!has_unlowered_for(&arena, root));
    validate(&arena, root).unwrap();

    // Shape: Block { init, While { cond: has_next call, body } }
    let NodeKind::Block { body } = arena.kind(root) else {
        panic!("expected block root, got {:?}", arena.kind(root));
    };
    assert_eq!(body.len(), 2);
    assert!(matches!(arena.kind(body[0]), NodeKind::Assign { .. }));
    let NodeKind::While { cond, body: loop_body } = arena.kind(body[1]) else {
        panic!("expected while, got {:?}", arena.kind(body[1]));
    };
    assert!(matches!(arena.kind(*cond), NodeKind::Call { .. }));

    // Loop body binds the loop variable before running the original body.
    let NodeKind::Block { body: loop_stmts } = arena.kind(*loop_body) else {
        panic!("expected block loop body");
    };
    assert!(matches!(arena.kind(loop_stmts[0]), NodeKind::Assign { .. }));

    // Every synthesized node is born resolved.
    for id in reachable_ids(&arena, root) {
        assert!(arena.is_done(id), "{id:?} not done");
        assert!(arena.ty(id).is_valid(), "{id:?} has no type");
    }
}

#[test]
fn for_inside_a_parent_is_replaced_in_place() {
    let interner = StringInterner::new();
    let (mut arena, mut pool, for_node) = typed_for(&interner);
    let outer = push_typed(
        &mut arena,
        NodeKind::Block {
            body: vec![for_node],
        },
        Name::EMPTY,
        Idx::UNIT,
    );

    let mut cx = RewriteCx {
        arena: &mut arena,
        pool: &mut pool,
        interner: &interner,
    };
    let mut pass = ImperativeForLowering;
    let root = run_pass(&mut pass, &mut cx, outer).unwrap();

    // The parent keeps its identity; only the slot was rewritten.
    assert_eq!(root, outer);
    let NodeKind::Block { body } = arena.kind(outer) else {
        panic!("expected block");
    };
    assert_ne!(body[0], for_node);
    assert!(!has_unlowered_for(&arena, outer));
}

#[test]
fn rerunning_on_lowered_ir_changes_nothing() {
    let interner = StringInterner::new();
    let (mut arena, mut pool, for_node) = typed_for(&interner);

    let mut manager = PassManager::new();
    manager.register(Box::new(ImperativeForLowering));

    let root = {
        let mut cx = RewriteCx {
            arena: &mut arena,
            pool: &mut pool,
            interner: &interner,
        };
        manager.run(&mut cx, for_node).unwrap()
    };

    let len_before = arena.len();
    let ids_before = reachable_ids(&arena, root);

    let root_again = {
        let mut cx = RewriteCx {
            arena: &mut arena,
            pool: &mut pool,
            interner: &interner,
        };
        manager.run(&mut cx, root).unwrap()
    };

    // Same node ids, same structure.
    assert_eq!(root_again, root);
    assert_eq!(arena.len(), len_before);
    assert_eq!(reachable_ids(&arena, root), ids_before);
}

#[test]
fn pass_without_matching_nodes_is_a_no_op() {
    let interner = StringInterner::new();
    let mut arena = IrArena::new();
    let mut pool = Pool::new();
    let lit = push_typed(&mut arena, NodeKind::IntLit(3), Name::EMPTY, Idx::INT);
    let block = push_typed(
        &mut arena,
        NodeKind::Block { body: vec![lit] },
        Name::EMPTY,
        Idx::UNIT,
    );

    let len_before = arena.len();
    let mut cx = RewriteCx {
        arena: &mut arena,
        pool: &mut pool,
        interner: &interner,
    };
    let mut pass = ImperativeForLowering;
    let root = run_pass(&mut pass, &mut cx, block).unwrap();

    assert_eq!(root, block);
    assert_eq!(arena.len(), len_before);
}

#[test]
fn pass_keys_are_stable() {
    assert_eq!(ImperativeForLowering.key(), ImperativeForLowering::KEY);
}
