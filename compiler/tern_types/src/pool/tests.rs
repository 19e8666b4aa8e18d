use pretty_assertions::assert_eq;

use super::*;
use tern_ir::StringInterner;

#[test]
fn primitives_have_fixed_indices() {
    let pool = Pool::new();
    assert_eq!(pool.tag(Idx::BOOL), Tag::Bool);
    assert_eq!(pool.tag(Idx::INT), Tag::Int);
    assert_eq!(pool.tag(Idx::FLOAT), Tag::Float);
    assert_eq!(pool.tag(Idx::STR), Tag::Str);
    assert_eq!(pool.tag(Idx::UNIT), Tag::Unit);
}

#[test]
fn interning_is_structural() {
    let mut pool = Pool::new();
    let a = pool.optional(Idx::INT);
    let b = pool.optional(Idx::INT);
    assert_eq!(a, b);

    let c = pool.optional(Idx::STR);
    assert_ne!(a, c);
}

#[test]
fn class_payload_round_trips() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let name = interner.intern("Box");

    let boxed = pool.class(name, &[Idx::INT, Idx::BOOL]);
    assert_eq!(pool.tag(boxed), Tag::Class);
    assert_eq!(pool.class_name(boxed), name);
    assert_eq!(pool.class_args(boxed), vec![Idx::INT, Idx::BOOL]);
}

#[test]
fn function_payload_round_trips() {
    let mut pool = Pool::new();
    let func = pool.function(&[Idx::INT, Idx::STR], Idx::BOOL);
    assert_eq!(pool.function_params(func), vec![Idx::INT, Idx::STR]);
    assert_eq!(pool.function_return(func), Idx::BOOL);
}

#[test]
fn fresh_vars_are_distinct() {
    let mut pool = Pool::new();
    let a = pool.fresh_var();
    let b = pool.fresh_var();
    assert_ne!(a, b);
    assert!(pool.var_state(pool.data(a)).is_unbound());
}

#[test]
fn flags_propagate_variable_presence() {
    let mut pool = Pool::new();
    let var = pool.fresh_var();
    let opt = pool.optional(var);
    assert!(pool.flags(opt).contains(TypeFlags::HAS_VAR));
    assert!(!pool.flags(Idx::INT).contains(TypeFlags::HAS_VAR));
}

#[test]
fn contains_unbound_follows_links() {
    let mut pool = Pool::new();
    let var = pool.fresh_var();
    let opt = pool.optional(var);
    assert!(pool.contains_unbound(opt));

    let var_id = pool.data(var);
    *pool.var_state_mut(var_id) = VarState::Link { target: Idx::INT };
    assert!(!pool.contains_unbound(opt));
}

#[test]
fn resolve_full_rebuilds_canonical_form() {
    let mut pool = Pool::new();
    let var = pool.fresh_var();
    let opt_var = pool.optional(var);

    let var_id = pool.data(var);
    *pool.var_state_mut(var_id) = VarState::Link { target: Idx::INT };

    let resolved = pool.resolve_full(opt_var);
    let expected = pool.optional(Idx::INT);
    assert_eq!(resolved, expected);
}

#[test]
fn zero_param_scheme_is_the_body() {
    let mut pool = Pool::new();
    assert_eq!(pool.scheme(0, Idx::INT), Idx::INT);
}
