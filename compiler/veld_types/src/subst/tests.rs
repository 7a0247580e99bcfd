use pretty_assertions::assert_eq;
use veld_ir::{DeclId, StringInterner};

use super::*;
use crate::ty::{ChanDir, Field, Term};

fn setup() -> (TypePool, StringInterner, Context) {
    (TypePool::new(), StringInterner::new(), Context::new())
}

#[test]
fn ground_types_come_back_by_index() {
    let (mut pool, interner, ctxt) = setup();
    let t = pool.type_param(interner.intern("T"), Idx::ANY);
    let smap = SubstMap::new(&pool, &[t], &[Idx::INT]);

    let m = pool.map_of(Idx::STR, Idx::BOOL);
    assert_eq!(substitute(&mut pool, m, &smap, &ctxt), m);
    assert_eq!(substitute(&mut pool, Idx::STR, &smap, &ctxt), Idx::STR);
}

#[test]
fn an_empty_map_is_a_no_op() {
    let (mut pool, interner, ctxt) = setup();
    let t = pool.type_param(interner.intern("T"), Idx::ANY);
    let slice = pool.slice(t);
    let smap = SubstMap::new(&pool, &[], &[]);
    assert!(smap.is_empty());
    assert_eq!(substitute(&mut pool, slice, &smap, &ctxt), slice);
}

#[test]
fn parameters_replace_by_identity_not_name() {
    let (mut pool, interner, ctxt) = setup();
    let name = interner.intern("T");
    let t1 = pool.type_param(name, Idx::ANY);
    let t2 = pool.type_param(name, Idx::ANY);
    let smap = SubstMap::new(&pool, &[t1], &[Idx::INT]);

    assert_eq!(substitute(&mut pool, t1, &smap, &ctxt), Idx::INT);
    // Same name, different parameter: untouched.
    assert_eq!(substitute(&mut pool, t2, &smap, &ctxt), t2);
}

#[test]
fn composites_rebuild_only_on_change() {
    let (mut pool, interner, ctxt) = setup();
    let t = pool.type_param(interner.intern("T"), Idx::ANY);
    let smap = SubstMap::new(&pool, &[t], &[Idx::INT]);

    let slice = pool.slice(t);
    let got = substitute(&mut pool, slice, &smap, &ctxt);
    assert_ne!(got, slice);
    let Type::Slice(s) = pool.get(got) else {
        panic!()
    };
    assert_eq!(s.elem, Idx::INT);

    let arr = pool.array(3, t);
    let got = substitute(&mut pool, arr, &smap, &ctxt);
    let Type::Array(a) = pool.get(got) else {
        panic!()
    };
    assert_eq!((a.len, a.elem), (3, Idx::INT));

    let ch = pool.chan(ChanDir::RecvOnly, t);
    let got = substitute(&mut pool, ch, &smap, &ctxt);
    let Type::Chan(c) = pool.get(got) else {
        panic!()
    };
    assert_eq!((c.dir, c.elem), (ChanDir::RecvOnly, Idx::INT));

    let m = pool.map_of(t, Idx::BOOL);
    let got = substitute(&mut pool, m, &smap, &ctxt);
    let Type::Map(mm) = pool.get(got) else {
        panic!()
    };
    assert_eq!((mm.key, mm.value), (Idx::INT, Idx::BOOL));
}

#[test]
fn struct_fields_keep_names_and_tags() {
    let (mut pool, interner, ctxt) = setup();
    let t = pool.type_param(interner.intern("T"), Idx::ANY);
    let smap = SubstMap::new(&pool, &[t], &[Idx::STR]);

    let mut f = Field::new(interner.intern("value"), t);
    f.tag = Some("v".into());
    let st = pool.struct_of(vec![f]);
    let got = substitute(&mut pool, st, &smap, &ctxt);
    let Type::Struct(s) = pool.get(got) else {
        panic!()
    };
    assert_eq!(s.fields[0].ty, Idx::STR);
    assert_eq!(s.fields[0].tag.as_deref(), Some("v"));
}

#[test]
fn signature_bound_parameters_are_not_free() {
    let (mut pool, interner, ctxt) = setup();
    let outer = pool.type_param(interner.intern("T"), Idx::ANY);
    let inner = pool.type_param(interner.intern("U"), Idx::ANY);
    // func<U>(U, T), where only T is free.
    let sig = pool.signature(vec![inner], vec![inner, outer], Vec::new(), false);
    let smap = SubstMap::new(&pool, &[outer], &[Idx::INT]);

    let got = substitute(&mut pool, sig, &smap, &ctxt);
    let Type::Signature(s) = pool.get(got) else {
        panic!()
    };
    assert_eq!(s.tparams, vec![inner]);
    assert_eq!(s.params, vec![inner, Idx::INT]);
}

#[test]
fn interfaces_lose_their_cached_set_on_rewrite() {
    let (mut pool, interner, ctxt) = setup();
    let t = pool.type_param(interner.intern("T"), Idx::ANY);
    let u = pool.union(vec![Term::approx(t)]);
    let iface = pool.interface(Vec::new(), vec![u]);

    // Compute and cache the set of the generic interface.
    let set = crate::typeset::type_set(&mut pool, iface);
    assert!(set.terms.is_some());

    let smap = SubstMap::new(&pool, &[t], &[Idx::INT]);
    let got = substitute(&mut pool, iface, &smap, &ctxt);
    assert_ne!(got, iface);
    let Type::Interface(i) = pool.get(got) else {
        panic!()
    };
    assert!(i.tset.is_none());

    let set = crate::typeset::type_set(&mut pool, got);
    assert_eq!(set.terms, Some(vec![Term::approx(Idx::INT)]));
}

#[test]
fn instances_reinstantiate_through_the_context() {
    let (mut pool, interner, ctxt) = setup();
    let t = pool.type_param(interner.intern("T"), Idx::ANY);
    let body = pool.slice(t);
    let origin = pool.named(
        DeclId::from_raw(1),
        interner.intern("List"),
        vec![t],
        body,
        Vec::new(),
    );

    // List<U> with U still abstract, then U -> int.
    let u_param = pool.type_param(interner.intern("U"), Idx::ANY);
    let abstract_inst = crate::instantiate::instance(&mut pool, origin, vec![u_param], None, &ctxt);
    let smap = SubstMap::new(&pool, &[u_param], &[Idx::INT]);
    let concrete = substitute(&mut pool, abstract_inst, &smap, &ctxt);
    assert_ne!(concrete, abstract_inst);
    assert_eq!(pool.type_args(concrete), &[Idx::INT]);

    // The rewritten instance is the context's canonical List<int>.
    let direct = crate::instantiate::instance(&mut pool, origin, vec![Idx::INT], None, &ctxt);
    assert_eq!(concrete, direct);

    // Unchanged arguments keep the original instance.
    let other = pool.type_param(interner.intern("W"), Idx::ANY);
    let smap = SubstMap::new(&pool, &[other], &[Idx::INT]);
    assert_eq!(substitute(&mut pool, abstract_inst, &smap, &ctxt), abstract_inst);
}
