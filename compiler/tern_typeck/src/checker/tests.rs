use pretty_assertions::assert_eq;

use super::*;
use crate::{typecheck, Realize, TypecheckOptions};
use tern_diagnostic::ErrorCode;
use tern_ir::VarScope;
use tern_types::Tag;

fn setup() -> (IrArena, Pool, Context, DiagnosticQueue, StringInterner) {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let ctx = Context::new(&interner, &mut pool);
    (
        IrArena::new(),
        pool,
        ctx,
        DiagnosticQueue::new(),
        interner,
    )
}

fn resolved_ty(arena: &IrArena, pool: &mut Pool, id: NodeId) -> Idx {
    let slot = arena.ty(id);
    assert!(slot.is_valid(), "node has no type slot");
    pool.resolve_full(Idx::from_raw(slot.raw()))
}

#[test]
fn int_literal_resolves_in_one_visit() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();
    let lit = arena.push_unnamed(NodeKind::IntLit(7), Span::new(0, 1));

    let mut checker = TypeChecker::new(&mut arena, &mut pool, &mut ctx, &mut diags, &interner);
    checker.visit(lit);

    assert!(arena.is_done(lit));
    assert_eq!(resolved_ty(&arena, &mut pool, lit), Idx::INT);
    assert!(!diags.has_errors());
}

#[test]
fn bool_literal_is_exactly_bool() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();
    let lit = arena.push_unnamed(NodeKind::BoolLit(true), Span::new(0, 4));

    let ok = typecheck(
        &mut arena,
        &mut pool,
        &mut ctx,
        &interner,
        &mut diags,
        &[lit],
        TypecheckOptions::default(),
    );

    assert!(ok);
    assert!(arena.is_done(lit));
    assert_eq!(resolved_ty(&arena, &mut pool, lit), Idx::BOOL);
}

#[test]
fn revisiting_a_done_node_is_a_no_op() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();
    let lit = arena.push_unnamed(NodeKind::StrLit(interner.intern("hi")), Span::DUMMY);

    let mut checker = TypeChecker::new(&mut arena, &mut pool, &mut ctx, &mut diags, &interner);
    checker.visit(lit);
    assert_eq!(checker.newly_done(), 1);

    let realizations_before = checker.ctx.realization_count();
    let pool_before = checker.pool.len();
    checker.visit(lit);

    // No type change, no new realizations, no new types.
    assert_eq!(checker.newly_done(), 1);
    assert_eq!(checker.ctx.realization_count(), realizations_before);
    assert_eq!(checker.pool.len(), pool_before);
}

#[test]
fn unconstrained_none_stays_optional_of_placeholder() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();
    let none = arena.push_unnamed(NodeKind::NoneLit, Span::new(0, 4));

    let ok = typecheck(
        &mut arena,
        &mut pool,
        &mut ctx,
        &interner,
        &mut diags,
        &[none],
        TypecheckOptions::default(),
    );

    // With no unifying context the inner type stays a placeholder: the
    // node cannot realize, and the budgeted fixpoint reports it.
    assert!(!ok);
    assert!(!arena.is_done(none));

    let ty = resolved_ty(&arena, &mut pool, none);
    assert_eq!(pool.tag(ty), Tag::Optional);
    assert!(pool.contains_unbound(ty));
    assert!(diags
        .diagnostics()
        .iter()
        .any(|d| d.code == ErrorCode::UnresolvedType));
}

#[test]
fn none_unified_against_context_realizes() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();

    let var = arena.push(
        NodeKind::Var {
            scope: VarScope::Local,
        },
        interner.intern("slot"),
        Span::new(0, 4),
    );
    let opt_int = pool.optional(Idx::INT);
    arena.set_ty(var, TypeId::from_raw(opt_int.raw()));

    let none = arena.push_unnamed(NodeKind::NoneLit, Span::new(7, 11));
    let assign = arena.push_unnamed(NodeKind::Assign { var, value: none }, Span::new(0, 11));

    let ok = typecheck(
        &mut arena,
        &mut pool,
        &mut ctx,
        &interner,
        &mut diags,
        &[assign],
        TypecheckOptions::default(),
    );

    assert!(ok, "diagnostics: {:?}", diags.diagnostics());
    assert!(arena.is_done(none));
    assert_eq!(resolved_ty(&arena, &mut pool, none), opt_int);

    // The empty-optional constructor for Optional[int] was realized.
    assert_eq!(ctx.realization_count(), 1);
}

#[test]
fn generic_round_trip_realizes_wrapper_of_argument() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();

    // Instantiate the one-argument wrapper definition at `int`, then
    // realize the result.
    let optional_scheme = ctx.get_type(ctx.builtins.optional).unwrap();
    let inst = pool.instantiate(optional_scheme, &[Idx::INT]).unwrap();
    let opt_int = pool.optional(Idx::INT);
    assert_eq!(inst, opt_int);

    let mut checker = TypeChecker::new(&mut arena, &mut pool, &mut ctx, &mut diags, &interner);
    let first = checker.realize(inst);
    let second = checker.realize(inst);

    let (Realize::Ready(first), Realize::Ready(second)) = (first, second) else {
        panic!("expected both realizations ready");
    };
    // Same identity both times, including the constructor node.
    assert_eq!(first, second);
    assert_eq!(first.ty, opt_int);
    assert_eq!(checker.ctx.realization_count(), 1);

    let construct = first.construct.unwrap();
    assert!(arena.is_done(construct));
    let construct_ty = resolved_ty(&arena, &mut pool, construct);
    let expected = pool.function(&[], opt_int);
    assert_eq!(construct_ty, expected);
}

#[test]
fn realizing_an_open_type_defers() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();
    let var = pool.fresh_var();
    let open = pool.optional(var);

    let mut checker = TypeChecker::new(&mut arena, &mut pool, &mut ctx, &mut diags, &interner);
    assert_eq!(checker.realize(open), Realize::Deferred);
    assert_eq!(checker.ctx.realization_count(), 0);
}

#[test]
fn generic_callee_instantiates_per_call_site() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();

    // identity: scheme[1] (#0) -> #0, as a bodiless definition
    let hole = pool.bound_var(0);
    let id_fn_ty = pool.function(&[hole], hole);
    let id_scheme = pool.scheme(1, id_fn_ty);
    let id_fn = arena.push(
        NodeKind::Func {
            params: vec![],
            body: None,
        },
        interner.intern("identity"),
        Span::DUMMY,
    );
    arena.set_ty(id_fn, TypeId::from_raw(id_scheme.raw()));

    let int_arg = arena.push_unnamed(NodeKind::IntLit(1), Span::DUMMY);
    let str_arg = arena.push_unnamed(NodeKind::StrLit(interner.intern("s")), Span::DUMMY);
    let call_int = arena.push_unnamed(
        NodeKind::Call {
            callee: id_fn,
            args: vec![int_arg],
        },
        Span::DUMMY,
    );
    let call_str = arena.push_unnamed(
        NodeKind::Call {
            callee: id_fn,
            args: vec![str_arg],
        },
        Span::DUMMY,
    );

    let ok = typecheck(
        &mut arena,
        &mut pool,
        &mut ctx,
        &interner,
        &mut diags,
        &[call_int, call_str],
        TypecheckOptions::default(),
    );

    assert!(ok, "diagnostics: {:?}", diags.diagnostics());
    assert_eq!(resolved_ty(&arena, &mut pool, call_int), Idx::INT);
    assert_eq!(resolved_ty(&arena, &mut pool, call_str), Idx::STR);
}

#[test]
fn for_loop_variable_takes_the_element_type() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();

    let iterable = arena.push(
        NodeKind::Var {
            scope: VarScope::Local,
        },
        interner.intern("xs"),
        Span::DUMMY,
    );
    let iter_int = {
        let name = ctx.builtins.iterator;
        pool.class(name, &[Idx::INT])
    };
    arena.set_ty(iterable, TypeId::from_raw(iter_int.raw()));

    let iter_ref = arena.push_unnamed(NodeKind::VarRef { var: iterable }, Span::DUMMY);
    let loop_var = arena.push(
        NodeKind::Var {
            scope: VarScope::Local,
        },
        interner.intern("x"),
        Span::DUMMY,
    );
    let body = arena.push_unnamed(NodeKind::Block { body: vec![] }, Span::DUMMY);
    let for_node = arena.push_unnamed(
        NodeKind::For {
            iter: iter_ref,
            var: loop_var,
            body,
        },
        Span::DUMMY,
    );

    let ok = typecheck(
        &mut arena,
        &mut pool,
        &mut ctx,
        &interner,
        &mut diags,
        &[for_node],
        TypecheckOptions::default(),
    );

    assert!(ok, "diagnostics: {:?}", diags.diagnostics());
    assert_eq!(resolved_ty(&arena, &mut pool, loop_var), Idx::INT);
    assert_eq!(resolved_ty(&arena, &mut pool, for_node), Idx::UNIT);
}

#[test]
fn scope_chain_seeds_variable_types() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();

    // Name resolution declared `count: int` before checking started.
    let name = interner.intern("count");
    ctx.bind(name, Idx::INT);

    let var = arena.push(
        NodeKind::Var {
            scope: VarScope::Global,
        },
        name,
        Span::new(0, 5),
    );
    let var_ref = arena.push_unnamed(NodeKind::VarRef { var }, Span::new(8, 13));

    let ok = typecheck(
        &mut arena,
        &mut pool,
        &mut ctx,
        &interner,
        &mut diags,
        &[var_ref],
        TypecheckOptions::default(),
    );

    assert!(ok, "diagnostics: {:?}", diags.diagnostics());
    assert_eq!(resolved_ty(&arena, &mut pool, var), Idx::INT);
    assert_eq!(resolved_ty(&arena, &mut pool, var_ref), Idx::INT);
}

#[test]
fn independent_errors_are_batched() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();

    // if <int literal> { } — condition must be bool
    let bad_cond = arena.push_unnamed(NodeKind::IntLit(1), Span::new(0, 1));
    let then_body = arena.push_unnamed(NodeKind::Block { body: vec![] }, Span::new(2, 4));
    let if_node = arena.push_unnamed(
        NodeKind::If {
            cond: bad_cond,
            then_body,
            else_body: None,
        },
        Span::new(0, 4),
    );

    // str_var = <int literal> — mismatched assignment
    let str_var = arena.push(
        NodeKind::Var {
            scope: VarScope::Local,
        },
        interner.intern("s"),
        Span::new(6, 7),
    );
    arena.set_ty(str_var, TypeId::from_raw(Idx::STR.raw()));
    let int_value = arena.push_unnamed(NodeKind::IntLit(2), Span::new(10, 11));
    let assign = arena.push_unnamed(
        NodeKind::Assign {
            var: str_var,
            value: int_value,
        },
        Span::new(6, 11),
    );

    typecheck(
        &mut arena,
        &mut pool,
        &mut ctx,
        &interner,
        &mut diags,
        &[if_node, assign],
        TypecheckOptions::default(),
    );

    // Both independent subtrees report, not just the first.
    let mismatches = diags
        .diagnostics()
        .iter()
        .filter(|d| d.code == ErrorCode::TypeMismatch)
        .count();
    assert_eq!(mismatches, 2);
}

#[test]
fn exhausted_budget_reports_unresolved_types() {
    let (mut arena, mut pool, mut ctx, mut diags, interner) = setup();

    // A bare variable with no constraints can never resolve.
    let var = arena.push(
        NodeKind::Var {
            scope: VarScope::Local,
        },
        interner.intern("orphan"),
        Span::new(0, 6),
    );

    let ok = typecheck(
        &mut arena,
        &mut pool,
        &mut ctx,
        &interner,
        &mut diags,
        &[var],
        TypecheckOptions { max_passes: 3 },
    );

    assert!(!ok);
    assert!(diags
        .diagnostics()
        .iter()
        .any(|d| d.code == ErrorCode::UnresolvedType));
}
