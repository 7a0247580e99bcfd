use veld_ir::{DeclId, StringInterner};

use super::*;
use crate::context::Context;
use crate::instantiate::instantiate;
use crate::ty::{Field, Method, Term};

fn setup() -> (TypePool, StringInterner) {
    (TypePool::new(), StringInterner::new())
}

#[test]
fn basics_compare_by_kind_not_node() {
    let (pool, _) = setup();
    // byte and uint8 are distinct nodes of the same kind.
    assert!(identical(&pool, Idx::BYTE, Idx::UINT8));
    assert!(identical(&pool, Idx::RUNE, Idx::INT32));
    assert!(!identical(&pool, Idx::INT, Idx::INT64));
}

#[test]
fn aliases_are_transparent() {
    let (mut pool, interner) = setup();
    let a = pool.alias(
        DeclId::from_raw(1),
        interner.intern("Celsius"),
        Vec::new(),
        Idx::FLOAT64,
    );
    assert!(identical(&pool, a, Idx::FLOAT64));

    let s1 = pool.slice(a);
    let s2 = pool.slice(Idx::FLOAT64);
    assert!(identical(&pool, s1, s2));
}

#[test]
fn structurally_equal_composites_are_identical() {
    let (mut pool, interner) = setup();
    let m1 = pool.map_of(Idx::STR, Idx::INT);
    let m2 = pool.map_of(Idx::STR, Idx::INT);
    assert_ne!(m1, m2);
    assert!(identical(&pool, m1, m2));

    let a1 = pool.array(3, Idx::INT);
    let a2 = pool.array(4, Idx::INT);
    assert!(!identical(&pool, a1, a2));

    let f = interner.intern("x");
    let s1 = pool.struct_of(vec![Field::new(f, Idx::INT)]);
    let s2 = pool.struct_of(vec![Field::new(f, Idx::INT)]);
    assert!(identical(&pool, s1, s2));
}

#[test]
fn field_tags_are_significant_unless_ignored() {
    let (mut pool, interner) = setup();
    let name = interner.intern("id");
    let mut tagged = Field::new(name, Idx::INT);
    tagged.tag = Some("key".into());
    let t1 = pool.struct_of(vec![tagged]);
    let t2 = pool.struct_of(vec![Field::new(name, Idx::INT)]);

    assert!(!identical(&pool, t1, t2));
    assert!(identical_ignoring_tags(&pool, t1, t2));
}

#[test]
fn type_params_are_identical_only_to_themselves() {
    let (mut pool, interner) = setup();
    let name = interner.intern("T");
    let t1 = pool.type_param(name, Idx::ANY);
    let t2 = pool.type_param(name, Idx::ANY);
    assert!(identical(&pool, t1, t1));
    assert!(!identical(&pool, t1, t2));
}

#[test]
fn named_types_compare_by_declaration() {
    let (mut pool, interner) = setup();
    let s = pool.slice(Idx::INT);
    let n1 = pool.named(
        DeclId::from_raw(1),
        interner.intern("A"),
        Vec::new(),
        s,
        Vec::new(),
    );
    let n2 = pool.named(
        DeclId::from_raw(2),
        interner.intern("B"),
        Vec::new(),
        s,
        Vec::new(),
    );
    // Same shape, different declarations.
    assert!(!identical(&pool, n1, n2));
    assert!(identical(&pool, n1, n1));
}

#[test]
fn instances_compare_by_declaration_and_arguments() {
    let (mut pool, interner) = setup();
    let ctxt_a = Context::new();
    let ctxt_b = Context::new();
    let t = pool.type_param(interner.intern("T"), Idx::ANY);
    let body = pool.slice(t);
    let origin = pool.named(
        DeclId::from_raw(1),
        interner.intern("List"),
        vec![t],
        body,
        Vec::new(),
    );

    // Separate contexts so the nodes are distinct.
    let Ok(i1) = instantiate(&mut pool, &interner, &ctxt_a, origin, vec![Idx::INT], false) else {
        panic!()
    };
    let Ok(i2) = instantiate(&mut pool, &interner, &ctxt_b, origin, vec![Idx::INT], false) else {
        panic!()
    };
    let Ok(i3) = instantiate(&mut pool, &interner, &ctxt_b, origin, vec![Idx::STR], false) else {
        panic!()
    };

    assert_ne!(i1, i2);
    assert!(identical_instance(&pool, i1, i2));
    assert!(!identical_instance(&pool, i1, i3));
    assert!(!identical(&pool, i1, origin));
}

#[test]
fn signatures_compare_bounds_params_and_results() {
    let (mut pool, interner) = setup();
    let f1 = pool.signature(Vec::new(), vec![Idx::INT], vec![Idx::BOOL], false);
    let f2 = pool.signature(Vec::new(), vec![Idx::INT], vec![Idx::BOOL], false);
    let f3 = pool.signature(Vec::new(), vec![Idx::INT], vec![Idx::BOOL], true);
    assert!(identical(&pool, f1, f2));
    assert!(!identical(&pool, f1, f3));

    let t1 = pool.type_param(interner.intern("T"), Idx::ANY);
    let t2 = pool.type_param(interner.intern("U"), Idx::ANY);
    let g1 = pool.signature(vec![t1], vec![t1], vec![t1], false);
    let g2 = pool.signature(vec![t2], vec![t2], vec![t2], false);
    // Bound parameters match positionally, so these are alpha-equivalent.
    assert!(identical(&pool, g1, g2));

    let g3 = pool.signature(vec![t2], vec![Idx::INT], vec![t2], false);
    assert!(!identical(&pool, g1, g3));
}

#[test]
fn mutually_embedding_interfaces_terminate() {
    let (mut pool, interner) = setup();
    let m = interner.intern("m");

    // Two pairs of interfaces, each pair embedding each other.
    let build = |pool: &mut TypePool| {
        let a = pool.interface(Vec::new(), Vec::new());
        let sig = pool.signature(Vec::new(), vec![Idx::INT], Vec::new(), false);
        let b = pool.interface(vec![Method { name: m, sig }], vec![a]);
        pool.set_interface_embeddeds(a, vec![b]);
        (a, b)
    };
    let (a1, b1) = build(&mut pool);
    let (a2, b2) = build(&mut pool);

    assert!(identical(&pool, a1, a2));
    assert!(identical(&pool, b1, b2));
    assert!(!identical(&pool, a1, b2));
}

#[test]
fn interface_member_order_is_insignificant() {
    let (mut pool, interner) = setup();
    let a = interner.intern("a");
    let b = interner.intern("b");
    let sig_a = pool.signature(Vec::new(), Vec::new(), vec![Idx::INT], false);
    let sig_b = pool.signature(Vec::new(), Vec::new(), vec![Idx::STR], false);

    let i1 = pool.interface(
        vec![Method { name: a, sig: sig_a }, Method { name: b, sig: sig_b }],
        Vec::new(),
    );
    let i2 = pool.interface(
        vec![Method { name: b, sig: sig_b }, Method { name: a, sig: sig_a }],
        Vec::new(),
    );
    // Same names, swapped signatures.
    let i3 = pool.interface(
        vec![Method { name: a, sig: sig_b }, Method { name: b, sig: sig_a }],
        Vec::new(),
    );
    assert!(identical(&pool, i1, i2));
    assert!(!identical(&pool, i1, i3));

    let e1 = pool.interface(Vec::new(), vec![i1, Idx::COMPARABLE]);
    let e2 = pool.interface(Vec::new(), vec![Idx::COMPARABLE, i2]);
    assert!(identical(&pool, e1, e2));
}

#[test]
fn unions_compare_as_sets() {
    let (mut pool, _) = setup();
    let u1 = pool.union(vec![Term::exact(Idx::INT), Term::approx(Idx::STR)]);
    let u2 = pool.union(vec![Term::approx(Idx::STR), Term::exact(Idx::INT)]);
    let u3 = pool.union(vec![Term::exact(Idx::INT), Term::exact(Idx::STR)]);
    assert!(identical(&pool, u1, u2));
    assert!(!identical(&pool, u1, u3));
}

#[test]
fn invalids_match_only_under_the_lenient_comparer() {
    let (pool, _) = setup();
    assert!(!identical(&pool, Idx::INVALID, Idx::INT));
    let lenient = TypeComparer {
        ignore_invalids: true,
        ..TypeComparer::default()
    };
    assert!(lenient.identical(&pool, Idx::INVALID, Idx::INT));
}
