use pretty_assertions::assert_eq;
use veld_ir::{DeclId, StringInterner};

use super::*;
use crate::ty::Term;

fn setup() -> (TypePool, StringInterner) {
    (TypePool::new(), StringInterner::new())
}

#[test]
fn classification_of_basics() {
    let (mut pool, _) = setup();
    assert!(is_integer(&mut pool, Idx::INT));
    assert!(is_integer(&mut pool, Idx::BYTE));
    assert!(is_unsigned(&mut pool, Idx::UINT16));
    assert!(!is_unsigned(&mut pool, Idx::INT16));
    assert!(is_float(&mut pool, Idx::FLOAT32));
    assert!(is_complex(&mut pool, Idx::COMPLEX128));
    assert!(is_numeric(&mut pool, Idx::UNTYPED_RUNE));
    assert!(is_string(&mut pool, Idx::STR));
    assert!(is_boolean(&mut pool, Idx::UNTYPED_BOOL));
    assert!(is_untyped(&mut pool, Idx::UNTYPED_INT));
    assert!(!is_untyped(&mut pool, Idx::INT));
    assert!(is_ordered(&mut pool, Idx::STR));
    assert!(!is_ordered(&mut pool, Idx::BOOL));
    assert!(is_const_type(&mut pool, Idx::STR));
    assert!(!is_const_type(&mut pool, Idx::UNTYPED_NIL));
}

#[test]
fn classification_looks_through_named_types() {
    let (mut pool, interner) = setup();
    let myint = pool.named(
        DeclId::from_raw(1),
        interner.intern("MyInt"),
        Vec::new(),
        Idx::INT,
        Vec::new(),
    );
    assert!(is_integer(&mut pool, myint));
    assert!(is_ordered(&mut pool, myint));
    assert!(!is_string(&mut pool, myint));
}

#[test]
fn type_params_fail_is_but_may_pass_all() {
    let (mut pool, interner) = setup();
    let u = pool.union(vec![Term::exact(Idx::INT), Term::exact(Idx::INT64)]);
    let bound = pool.interface(Vec::new(), vec![u]);
    let tp = pool.type_param(interner.intern("T"), bound);

    assert!(!is_integer(&mut pool, tp));
    assert!(all_integer(&mut pool, tp));
    assert!(all_ordered(&mut pool, tp));
    assert!(all_numeric(&mut pool, tp));
    assert!(!all_string(&mut pool, tp));

    // An unrestricted constraint qualifies for nothing.
    let open = pool.type_param(interner.intern("U"), Idx::ANY);
    assert!(!all_integer(&mut pool, open));
    assert!(!all_boolean(&mut pool, open));
}

#[test]
fn all_predicates_on_ground_types_match_is() {
    let (mut pool, _) = setup();
    assert!(all_integer(&mut pool, Idx::INT));
    assert!(!all_integer(&mut pool, Idx::STR));
    assert!(all_string(&mut pool, Idx::STR));
}

#[test]
fn type_param_and_interface_detection() {
    let (mut pool, interner) = setup();
    let tp = pool.type_param(interner.intern("T"), Idx::ANY);
    assert!(is_type_param(&pool, tp));
    assert!(!is_type_param(&pool, Idx::INT));

    assert!(is_interface(&mut pool, Idx::ANY));
    // A parameter is not an interface even though its bound is.
    assert!(!is_interface(&mut pool, tp));

    let named_iface = pool.named(
        DeclId::from_raw(1),
        interner.intern("Reader"),
        Vec::new(),
        Idx::ANY,
        Vec::new(),
    );
    assert!(is_interface(&mut pool, named_iface));
}

#[test]
fn generic_origins_and_instances() {
    let (mut pool, interner) = setup();
    let t = pool.type_param(interner.intern("T"), Idx::ANY);
    let body = pool.slice(t);
    let origin = pool.named(
        DeclId::from_raw(1),
        interner.intern("List"),
        vec![t],
        body,
        Vec::new(),
    );
    assert!(is_generic(&pool, origin));
    assert!(!is_generic(&pool, Idx::INT));

    let ctxt = crate::context::Context::new();
    let Ok(inst) = crate::instantiate::instantiate(
        &mut pool,
        &interner,
        &ctxt,
        origin,
        vec![Idx::INT],
        false,
    ) else {
        panic!()
    };
    assert!(!is_generic(&pool, inst));
}

#[test]
fn nilability() {
    let (mut pool, _) = setup();
    let s = pool.slice(Idx::INT);
    let p = pool.pointer(Idx::INT);
    let f = pool.signature(Vec::new(), Vec::new(), Vec::new(), false);
    assert!(has_nil(&mut pool, s));
    assert!(has_nil(&mut pool, p));
    assert!(has_nil(&mut pool, f));
    assert!(has_nil(&mut pool, Idx::ANY));
    assert!(has_nil(&mut pool, Idx::UNSAFE_POINTER));
    assert!(has_nil(&mut pool, Idx::UNTYPED_NIL));
    assert!(!has_nil(&mut pool, Idx::INT));

    let a = pool.array(3, Idx::INT);
    assert!(!has_nil(&mut pool, a));
}

#[test]
fn untyped_constants_default() {
    let (pool, _) = setup();
    assert_eq!(default_type(&pool, Idx::UNTYPED_BOOL), Idx::BOOL);
    assert_eq!(default_type(&pool, Idx::UNTYPED_INT), Idx::INT);
    assert_eq!(default_type(&pool, Idx::UNTYPED_RUNE), Idx::RUNE);
    assert_eq!(default_type(&pool, Idx::UNTYPED_FLOAT), Idx::FLOAT64);
    assert_eq!(default_type(&pool, Idx::UNTYPED_COMPLEX), Idx::COMPLEX128);
    assert_eq!(default_type(&pool, Idx::UNTYPED_STR), Idx::STR);

    // nil and typed operands stay put.
    assert_eq!(default_type(&pool, Idx::UNTYPED_NIL), Idx::UNTYPED_NIL);
    assert_eq!(default_type(&pool, Idx::INT32), Idx::INT32);
}

#[test]
fn max_type_widens_untyped_numerics() {
    let (pool, _) = setup();
    assert_eq!(max_type(&pool, Idx::INT, Idx::INT), Some(Idx::INT));
    assert_eq!(
        max_type(&pool, Idx::UNTYPED_INT, Idx::UNTYPED_FLOAT),
        Some(Idx::UNTYPED_FLOAT)
    );
    assert_eq!(
        max_type(&pool, Idx::UNTYPED_COMPLEX, Idx::UNTYPED_RUNE),
        Some(Idx::UNTYPED_COMPLEX)
    );
    assert_eq!(
        max_type(&pool, Idx::UNTYPED_INT, Idx::UNTYPED_RUNE),
        Some(Idx::UNTYPED_RUNE)
    );
    // Typed operands have no common maximum unless equal.
    assert_eq!(max_type(&pool, Idx::INT, Idx::FLOAT64), None);
    assert_eq!(max_type(&pool, Idx::UNTYPED_INT, Idx::INT), None);
}

#[test]
fn validity() {
    let (mut pool, interner) = setup();
    assert!(is_valid(&pool, Idx::INT));
    assert!(!is_valid(&pool, Idx::INVALID));
    assert!(!is_valid(&pool, Idx::NONE));
    let a = pool.alias(
        DeclId::from_raw(1),
        interner.intern("Bad"),
        Vec::new(),
        Idx::INVALID,
    );
    assert!(!is_valid(&pool, a));
}
