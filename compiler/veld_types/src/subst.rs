//! Type parameter substitution.
//!
//! [`subst`] walks a type and replaces free type parameters according to a
//! [`SubstMap`]. The walk is copy-on-write: a subtree with no parameter
//! occurrences comes back as the original [`Idx`], so substitution never
//! duplicates ground types.
//!
//! Named and alias instances are not rewritten in place; their type
//! arguments are substituted and the result re-instantiated through the
//! active [`Context`], which keeps canonical identity intact.

use rustc_hash::FxHashMap;
use veld_stack::ensure_sufficient_stack;

use crate::context::Context;
use crate::instantiate::instance;
use crate::ty::{Method, Type};
use crate::{Idx, TypePool};

/// Maps type parameter identities to replacement types.
pub struct SubstMap {
    map: FxHashMap<u32, Idx>,
}

impl SubstMap {
    /// Pair up parameters and arguments. The lists must be the same
    /// length; callers validate counts before building a map.
    pub fn new(pool: &TypePool, tparams: &[Idx], targs: &[Idx]) -> Self {
        assert_eq!(tparams.len(), targs.len(), "mismatched substitution lists");
        let mut map = FxHashMap::default();
        for (&tp, &ta) in tparams.iter().zip(targs) {
            let Type::TypeParam(p) = pool.get(tp) else {
                panic!("substituting a {}", pool.get(tp).kind_name())
            };
            map.insert(p.id, ta);
        }
        SubstMap { map }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn lookup(&self, id: u32) -> Option<Idx> {
        self.map.get(&id).copied()
    }
}

/// Substitute free type parameters in `t` according to `smap`. New
/// instances created along the way are deduplicated through `ctxt`.
pub fn substitute(pool: &mut TypePool, t: Idx, smap: &SubstMap, ctxt: &Context) -> Idx {
    subst(pool, t, smap, None, ctxt)
}

/// Substitute through `idx`. Returns `idx` itself when nothing changed.
///
/// `expanding` is the Named instance currently being expanded, if any; it
/// carries the context new instances created during the walk must land in.
pub(crate) fn subst(
    pool: &mut TypePool,
    idx: Idx,
    smap: &SubstMap,
    expanding: Option<Idx>,
    ctxt: &Context,
) -> Idx {
    if smap.is_empty() || idx.is_none() {
        return idx;
    }
    ensure_sufficient_stack(|| subst_inner(pool, idx, smap, expanding, ctxt))
}

fn subst_inner(
    pool: &mut TypePool,
    idx: Idx,
    smap: &SubstMap,
    expanding: Option<Idx>,
    ctxt: &Context,
) -> Idx {
    // Clone the node up front; the arms below need the pool mutably.
    match pool.get(idx).clone() {
        Type::Basic(_) => idx,

        Type::TypeParam(p) => smap.lookup(p.id).unwrap_or(idx),

        Type::Named(n) => match n.inst {
            // A declared type has no free parameters of its own; only its
            // instances embed substitutable arguments.
            None => idx,
            Some(inst) => {
                let (targs, changed) = subst_list(pool, &inst.targs, smap, expanding, ctxt);
                if !changed {
                    return idx;
                }
                instance(pool, inst.orig, targs, expanding, ctxt)
            }
        },

        Type::Alias(a) => {
            if let Some(orig) = a.orig {
                let (targs, changed) = subst_list(pool, &a.targs, smap, expanding, ctxt);
                if !changed {
                    return idx;
                }
                return instance(pool, orig, targs, expanding, ctxt);
            }
            let aliased = subst(pool, a.aliased, smap, expanding, ctxt);
            if aliased == a.aliased {
                return idx;
            }
            let mut copy = a;
            copy.aliased = aliased;
            pool.push(Type::Alias(copy))
        }

        Type::Signature(s) => {
            let (params, pc) = subst_list(pool, &s.params, smap, expanding, ctxt);
            let (results, rc) = subst_list(pool, &s.results, smap, expanding, ctxt);
            if !pc && !rc {
                return idx;
            }
            // The signature's own parameters are bound, not free; they
            // carry over untouched.
            pool.signature(s.tparams, params, results, s.variadic)
        }

        Type::Interface(i) => {
            let (methods, mc) = subst_methods(pool, &i.methods, smap, expanding, ctxt);
            let (embeddeds, ec) = subst_list(pool, &i.embeddeds, smap, expanding, ctxt);
            if !mc && !ec {
                return idx;
            }
            let new = pool.interface(methods, embeddeds);
            if i.comparable {
                let Type::Interface(data) = pool.get_mut(new) else {
                    unreachable!()
                };
                data.comparable = true;
            }
            new
        }

        Type::Struct(s) => {
            let mut changed = false;
            let mut new_fields = Vec::with_capacity(s.fields.len());
            for f in &s.fields {
                let ty = subst(pool, f.ty, smap, expanding, ctxt);
                changed |= ty != f.ty;
                let mut nf = f.clone();
                nf.ty = ty;
                new_fields.push(nf);
            }
            if !changed {
                return idx;
            }
            pool.struct_of(new_fields)
        }

        Type::Array(a) => {
            let (len, elem) = (a.len, a.elem);
            let new_elem = subst(pool, elem, smap, expanding, ctxt);
            if new_elem == elem {
                idx
            } else {
                pool.array(len, new_elem)
            }
        }

        Type::Slice(s) => {
            let elem = s.elem;
            let new_elem = subst(pool, elem, smap, expanding, ctxt);
            if new_elem == elem {
                idx
            } else {
                pool.slice(new_elem)
            }
        }

        Type::Pointer(p) => {
            let elem = p.elem;
            let new_elem = subst(pool, elem, smap, expanding, ctxt);
            if new_elem == elem {
                idx
            } else {
                pool.pointer(new_elem)
            }
        }

        Type::Map(m) => {
            let (key, value) = (m.key, m.value);
            let new_key = subst(pool, key, smap, expanding, ctxt);
            let new_value = subst(pool, value, smap, expanding, ctxt);
            if new_key == key && new_value == value {
                idx
            } else {
                pool.map_of(new_key, new_value)
            }
        }

        Type::Chan(c) => {
            let (dir, elem) = (c.dir, c.elem);
            let new_elem = subst(pool, elem, smap, expanding, ctxt);
            if new_elem == elem {
                idx
            } else {
                pool.chan(dir, new_elem)
            }
        }

        Type::Union(u) => {
            let mut changed = false;
            let mut new_terms = Vec::with_capacity(u.terms.len());
            for t in &u.terms {
                let ty = subst(pool, t.ty, smap, expanding, ctxt);
                changed |= ty != t.ty;
                new_terms.push(crate::ty::Term { tilde: t.tilde, ty });
            }
            if !changed {
                return idx;
            }
            pool.union(new_terms)
        }
    }
}

fn subst_list(
    pool: &mut TypePool,
    list: &[Idx],
    smap: &SubstMap,
    expanding: Option<Idx>,
    ctxt: &Context,
) -> (Vec<Idx>, bool) {
    let mut changed = false;
    let mut out = Vec::with_capacity(list.len());
    for &t in list {
        let nt = subst(pool, t, smap, expanding, ctxt);
        changed |= nt != t;
        out.push(nt);
    }
    (out, changed)
}

fn subst_methods(
    pool: &mut TypePool,
    methods: &[Method],
    smap: &SubstMap,
    expanding: Option<Idx>,
    ctxt: &Context,
) -> (Vec<Method>, bool) {
    let mut changed = false;
    let mut out = Vec::with_capacity(methods.len());
    for m in methods {
        let sig = subst(pool, m.sig, smap, expanding, ctxt);
        changed |= sig != m.sig;
        out.push(Method { name: m.name, sig });
    }
    (out, changed)
}

#[cfg(test)]
mod tests;
