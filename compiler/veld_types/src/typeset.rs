//! Interface type sets and constraint satisfaction.
//!
//! An interface denotes a set of types: the types that have all its
//! methods and lie in its term set. [`TypeSet`] is the computed form,
//! cached on the interface node. `terms == None` means the universe (no
//! term restriction at all), as opposed to `Some(vec![])`, the empty set.
//!
//! [`implements`] answers whether a type satisfies an interface, with a
//! cause string for diagnostics; constraint checking during instantiation
//! goes through it.

use rustc_hash::FxHashSet;
use veld_ir::StringInterner;
use veld_stack::ensure_sufficient_stack;

use crate::comparable::{comparable_type, strictly_comparable};
use crate::identity::identical;
use crate::ty::{Method, Term, Type};
use crate::{Idx, TypePool};

/// The computed type set of an interface.
#[derive(Clone, Debug)]
pub struct TypeSet {
    pub methods: Vec<Method>,
    /// `None` is the universe; `Some(vec![])` is the empty set.
    pub terms: Option<Vec<Term>>,
    /// Whether the set requires comparability (embeds `comparable`).
    pub comparable: bool,
}

impl TypeSet {
    fn universe() -> Self {
        TypeSet {
            methods: Vec::new(),
            terms: None,
            comparable: false,
        }
    }

    /// No type belongs to this set.
    pub fn is_empty(&self) -> bool {
        self.terms.as_ref().is_some_and(Vec::is_empty)
    }

    /// Every type belongs to this set.
    pub fn is_all(&self) -> bool {
        self.methods.is_empty() && self.terms.is_none() && !self.comparable
    }

    /// Do all types in the set support `==`? The empty set does not.
    pub fn is_comparable(&self, pool: &mut TypePool) -> bool {
        let Some(terms) = &self.terms else {
            return self.comparable;
        };
        // Strict comparability; interface terms do not get the dynamic
        // pass.
        !terms.is_empty() && terms.iter().all(|t| strictly_comparable(pool, t.ty))
    }
}

/// Compute (or fetch the cached) type set of an interface node.
///
/// For any non-interface index this panics; resolve to an interface
/// first. An interface whose computation is already on the stack (a
/// cyclic embedding) contributes the universe, so cycles terminate.
pub fn type_set(pool: &mut TypePool, iface: Idx) -> TypeSet {
    let mut in_progress = FxHashSet::default();
    type_set_impl(pool, iface, &mut in_progress)
}

fn type_set_impl(pool: &mut TypePool, iface: Idx, in_progress: &mut FxHashSet<Idx>) -> TypeSet {
    let Type::Interface(data) = pool.get(iface) else {
        panic!("type set of a {}", pool.get(iface).kind_name())
    };
    if let Some(tset) = &data.tset {
        return tset.clone();
    }
    if !in_progress.insert(iface) {
        return TypeSet::universe();
    }

    let methods = data.methods.clone();
    let embeddeds = data.embeddeds.clone();
    let comparable_bit = data.comparable;

    let mut set = TypeSet {
        methods,
        terms: None,
        comparable: comparable_bit,
    };

    for e in embeddeds {
        let sub = ensure_sufficient_stack(|| embedded_set(pool, e, in_progress));
        merge_methods(pool, &mut set.methods, &sub.methods);
        set.comparable |= sub.comparable;
        set.terms = intersect(pool, set.terms, sub.terms);
    }

    in_progress.remove(&iface);

    // Cache only a complete computation; a set observed mid-cycle would
    // pin the provisional universe.
    if in_progress.is_empty() {
        if let Type::Interface(data) = pool.get_mut(iface) {
            data.tset = Some(set.clone());
        }
    }
    set
}

/// The type set contributed by one embedded element.
fn embedded_set(pool: &mut TypePool, e: Idx, in_progress: &mut FxHashSet<Idx>) -> TypeSet {
    let under = pool.underlying(e);
    match pool.get(under).clone() {
        Type::Interface(_) => type_set_impl(pool, under, in_progress),
        Type::Union(u) => TypeSet {
            methods: Vec::new(),
            terms: Some(u.terms),
            comparable: false,
        },
        // A single embedded type is the one-term set {e}.
        _ => TypeSet {
            methods: Vec::new(),
            terms: Some(vec![Term::exact(e)]),
            comparable: false,
        },
    }
}

/// Union the method requirements, keeping one entry per name.
fn merge_methods(pool: &TypePool, into: &mut Vec<Method>, from: &[Method]) {
    for m in from {
        if let Some(have) = into.iter().find(|h| h.name == m.name) {
            // Duplicate declarations must agree; the checker reported a
            // conflict earlier if they do not.
            debug_assert!(identical(pool, have.sig, m.sig));
        } else {
            into.push(m.clone());
        }
    }
}

/// Intersect two term sets, `None` meaning the universe.
fn intersect(
    pool: &mut TypePool,
    a: Option<Vec<Term>>,
    b: Option<Vec<Term>>,
) -> Option<Vec<Term>> {
    match (a, b) {
        (None, b) => b,
        (a, None) => a,
        (Some(a), Some(b)) => {
            let mut out = Vec::new();
            for ta in &a {
                for tb in &b {
                    if let Some(t) = term_intersect(pool, *ta, *tb) {
                        if !out
                            .iter()
                            .any(|have: &Term| term_subsumes(pool, *have, t))
                        {
                            out.push(t);
                        }
                    }
                }
            }
            Some(out)
        }
    }
}

fn term_intersect(pool: &mut TypePool, x: Term, y: Term) -> Option<Term> {
    match (x.tilde, y.tilde) {
        // ~t ∩ ~s is ~t when t and s are identical.
        (true, true) | (false, false) => identical(pool, x.ty, y.ty).then_some(x),
        // ~t ∩ s is s when s's underlying type is t.
        (true, false) => {
            let u = pool.underlying(y.ty);
            identical(pool, u, x.ty).then_some(y)
        }
        (false, true) => {
            let u = pool.underlying(x.ty);
            identical(pool, u, y.ty).then_some(x)
        }
    }
}

/// Does term `x` cover everything term `y` covers?
fn term_subsumes(pool: &mut TypePool, x: Term, y: Term) -> bool {
    if x.tilde == y.tilde {
        return identical(pool, x.ty, y.ty);
    }
    if x.tilde {
        let u = pool.underlying(y.ty);
        return identical(pool, u, x.ty);
    }
    false
}

fn terms_include_term(pool: &mut TypePool, terms: &[Term], t: Term) -> bool {
    terms.iter().any(|have| term_subsumes(pool, *have, t))
}

/// Find a method by name on `v`: named types carry their own methods,
/// interfaces and type parameters answer through their type sets.
fn lookup_method(pool: &mut TypePool, v: Idx, name: veld_ir::Name) -> Option<Method> {
    let v = pool.unalias(v);
    match pool.get(v).clone() {
        Type::Named(_) => {
            pool.expand_named(v);
            let Type::Named(n) = pool.get(v) else {
                unreachable!()
            };
            n.methods.iter().find(|m| m.name == name).cloned()
        }
        Type::Pointer(p) => {
            let elem = pool.unalias(p.elem);
            if matches!(pool.get(elem), Type::Named(_)) {
                lookup_method(pool, elem, name)
            } else {
                None
            }
        }
        Type::Interface(_) => type_set(pool, v)
            .methods
            .iter()
            .find(|m| m.name == name)
            .cloned(),
        Type::TypeParam(tp) => {
            let bound = pool.underlying(tp.bound);
            if matches!(pool.get(bound), Type::Interface(_)) {
                type_set(pool, bound)
                    .methods
                    .iter()
                    .find(|m| m.name == name)
                    .cloned()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Does type `v` satisfy the interface `t`?
///
/// In constraint position (`constraint` true) a type argument that is
/// itself a type parameter is admitted when its whole constraint set lies
/// within `t`'s. On failure `cause` holds the reason.
#[tracing::instrument(level = "trace", skip(pool, interner, cause))]
pub fn implements(
    pool: &mut TypePool,
    interner: &StringInterner,
    v: Idx,
    t: Idx,
    constraint: bool,
    cause: &mut String,
) -> bool {
    if v.is_invalid() || t.is_invalid() {
        return true;
    }

    let tu = pool.underlying(t);
    if tu.is_invalid() || pool.underlying(v).is_invalid() {
        return true;
    }
    if !matches!(pool.get(tu), Type::Interface(_)) {
        set_cause(cause, |c| {
            c.push_str(&pool.display(t, interner));
            c.push_str(" is not an interface");
        });
        return false;
    }

    let tset = type_set(pool, tu);
    if tset.is_empty() {
        set_cause(cause, |c| {
            c.push_str("cannot implement ");
            c.push_str(&pool.display(t, interner));
            c.push_str(" (empty type set)");
        });
        return false;
    }

    // Method requirements.
    for want in &tset.methods {
        match lookup_method(pool, v, want.name) {
            None => {
                set_cause(cause, |c| {
                    c.push_str(&pool.display(v, interner));
                    c.push_str(" does not implement ");
                    c.push_str(&pool.display(t, interner));
                    c.push_str(" (missing method ");
                    c.push_str(interner.lookup(want.name));
                    c.push(')');
                });
                return false;
            }
            Some(have) if !identical(pool, have.sig, want.sig) => {
                set_cause(cause, |c| {
                    c.push_str(&pool.display(v, interner));
                    c.push_str(" does not implement ");
                    c.push_str(&pool.display(t, interner));
                    c.push_str(" (wrong type for method ");
                    c.push_str(interner.lookup(want.name));
                    c.push(')');
                });
                return false;
            }
            Some(_) => {}
        }
    }

    // Comparability requirement.
    if tset.comparable {
        let mut why = String::new();
        if !comparable_type(pool, interner, v, false, &mut why) {
            set_cause(cause, |c| {
                c.push_str(&pool.display(v, interner));
                c.push_str(" does not implement comparable");
                if !why.is_empty() {
                    c.push_str(" (");
                    c.push_str(&why);
                    c.push(')');
                }
            });
            return false;
        }
    }

    // Term requirements.
    let Some(tterms) = &tset.terms else {
        return true;
    };

    let vu = pool.underlying(v);
    let v_is_tparam = matches!(pool.get(pool.unalias(v)), Type::TypeParam(_));
    let v_terms: Option<Vec<Term>> = if constraint && v_is_tparam {
        // A type parameter argument stands for every type in its own
        // constraint; all of them must be admitted.
        type_set(pool, vu).terms
    } else if !v_is_tparam && matches!(pool.get(vu), Type::Interface(_)) {
        type_set(pool, vu).terms
    } else {
        Some(vec![Term::exact(v)])
    };

    let ok = match v_terms {
        // V's own set is unrestricted; only an unrestricted T admits it,
        // and T's terms are restricted here.
        None => false,
        Some(vterms) => {
            !vterms.is_empty()
                && vterms
                    .iter()
                    .all(|vt| terms_include_term(pool, tterms, *vt))
        }
    };
    if !ok {
        set_cause(cause, |c| {
            c.push_str(&pool.display(v, interner));
            c.push_str(" does not implement ");
            c.push_str(&pool.display(t, interner));
            c.push_str(" (");
            c.push_str(&pool.display(v, interner));
            c.push_str(" missing in term set)");
        });
        return false;
    }
    true
}

fn set_cause(cause: &mut String, f: impl FnOnce(&mut String)) {
    cause.clear();
    f(cause);
}
