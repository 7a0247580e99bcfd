//! Instantiation contexts.
//!
//! A [`Context`] deduplicates instances: asking it for `Pair<K, V>` with
//! the same origin and identical arguments twice yields the same [`Idx`],
//! even when the argument nodes were built independently. Deduplication is
//! an optimization contract only; correctness never depends on a hit.
//!
//! Entries are keyed by a structural hash and confirmed with
//! [`identical_instance`], so hash collisions cost a scan, never a wrong
//! answer. A context is cheap to clone and shared through an `Arc`; it is
//! internally locked and safe to use from multiple threads.

#![expect(
    clippy::disallowed_types,
    reason = "contexts are shared across checker phases and threads"
)]

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHasher, FxHashSet};

use crate::identity::{identical, identical_instance};
use crate::ty::Type;
use crate::{Idx, TypePool};

struct CtxtEntry {
    orig: Idx,
    targs: Vec<Idx>,
    instance: Idx,
}

#[derive(Default)]
struct ContextInner {
    map: FxHashMap<u64, Vec<CtxtEntry>>,
}

/// A deduplication scope for instantiated types.
#[derive(Clone, Default)]
pub struct Context {
    inner: Arc<Mutex<ContextInner>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Context")
            .field("buckets", &inner.map.len())
            .finish()
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Do the two handles name the same context?
    pub fn same(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Structural hash of an instantiation, independent of node indices:
    /// structurally identical argument lists hash alike, so a lookup can
    /// find an instance recorded under different nodes.
    pub(crate) fn instance_hash(pool: &TypePool, orig: Idx, targs: &[Idx]) -> u64 {
        let mut hasher = FxHasher::default();
        // The origin is a declaration, not a structure; its index is its
        // identity.
        orig.raw().hash(&mut hasher);
        targs.len().hash(&mut hasher);
        let mut seen = FxHashSet::default();
        for &t in targs {
            hash_type(pool, t, &mut hasher, &mut seen);
        }
        hasher.finish()
    }

    /// Find a previously recorded instance, if any.
    pub(crate) fn lookup(
        &self,
        pool: &TypePool,
        hash: u64,
        orig: Idx,
        targs: &[Idx],
    ) -> Option<Idx> {
        let inner = self.inner.lock();
        let bucket = inner.map.get(&hash)?;
        bucket
            .iter()
            .find(|e| entry_matches(pool, e, orig, targs))
            .map(|e| e.instance)
    }

    /// Record an instance, returning the canonical one: if an identical
    /// entry raced in first, that entry wins and the caller's node is
    /// abandoned.
    pub(crate) fn update(
        &self,
        pool: &TypePool,
        hash: u64,
        orig: Idx,
        targs: &[Idx],
        instance: Idx,
    ) -> Idx {
        let mut inner = self.inner.lock();
        let bucket = inner.map.entry(hash).or_default();
        if let Some(e) = bucket.iter().find(|e| entry_matches(pool, e, orig, targs)) {
            return e.instance;
        }
        bucket.push(CtxtEntry {
            orig,
            targs: targs.to_vec(),
            instance,
        });
        instance
    }
}

fn entry_matches(pool: &TypePool, e: &CtxtEntry, orig: Idx, targs: &[Idx]) -> bool {
    // Signature origins have no declaration identity, so only the same
    // node matches; declared types match through identity.
    let orig_ok = match pool.get(e.orig) {
        Type::Signature(_) => e.orig == orig,
        _ => e.orig == orig || identical(pool, e.orig, orig),
    };
    orig_ok
        && e.targs.len() == targs.len()
        && e.targs
            .iter()
            .zip(targs)
            .all(|(&a, &b)| identical_instance(pool, a, b))
}

fn hash_type(pool: &TypePool, t: Idx, hasher: &mut FxHasher, seen: &mut FxHashSet<Idx>) {
    if t.is_none() {
        0xffu8.hash(hasher);
        return;
    }
    let t = pool.unalias(t);
    if !seen.insert(t) {
        // Cycle; the guard byte keeps distinct cycle shapes separable
        // enough.
        0xfeu8.hash(hasher);
        return;
    }
    match pool.get(t) {
        Type::Basic(b) => {
            1u8.hash(hasher);
            (b.kind as u8).hash(hasher);
        }
        Type::Named(n) => {
            2u8.hash(hasher);
            n.decl.raw().hash(hasher);
            let targs = pool.type_args(t);
            targs.len().hash(hasher);
            for &ta in targs {
                hash_type(pool, ta, hasher, seen);
            }
        }
        Type::Alias(_) => unreachable!("aliases are resolved before hashing"),
        Type::TypeParam(p) => {
            3u8.hash(hasher);
            p.id.hash(hasher);
        }
        Type::Signature(s) => {
            4u8.hash(hasher);
            s.variadic.hash(hasher);
            s.tparams.len().hash(hasher);
            s.params.len().hash(hasher);
            s.results.len().hash(hasher);
            for &p in s.params.iter().chain(&s.results) {
                hash_type(pool, p, hasher, seen);
            }
        }
        Type::Interface(i) => {
            5u8.hash(hasher);
            i.comparable.hash(hasher);
            i.methods.len().hash(hasher);
            for m in &i.methods {
                m.name.raw().hash(hasher);
                hash_type(pool, m.sig, hasher, seen);
            }
            i.embeddeds.len().hash(hasher);
            for &e in &i.embeddeds {
                hash_type(pool, e, hasher, seen);
            }
        }
        Type::Struct(s) => {
            6u8.hash(hasher);
            s.fields.len().hash(hasher);
            for f in &s.fields {
                f.name.raw().hash(hasher);
                f.embedded.hash(hasher);
                hash_type(pool, f.ty, hasher, seen);
            }
        }
        Type::Array(a) => {
            7u8.hash(hasher);
            a.len.hash(hasher);
            hash_type(pool, a.elem, hasher, seen);
        }
        Type::Slice(s) => {
            8u8.hash(hasher);
            hash_type(pool, s.elem, hasher, seen);
        }
        Type::Pointer(p) => {
            9u8.hash(hasher);
            hash_type(pool, p.elem, hasher, seen);
        }
        Type::Map(m) => {
            10u8.hash(hasher);
            hash_type(pool, m.key, hasher, seen);
            hash_type(pool, m.value, hasher, seen);
        }
        Type::Chan(c) => {
            11u8.hash(hasher);
            (c.dir as u8).hash(hasher);
            hash_type(pool, c.elem, hasher, seen);
        }
        Type::Union(u) => {
            12u8.hash(hasher);
            // Unions compare order-insensitively; fold the terms with a
            // commutative combine so permutations hash alike.
            let mut acc = 0u64;
            for term in &u.terms {
                let mut th = FxHasher::default();
                term.tilde.hash(&mut th);
                let mut term_seen = seen.clone();
                hash_type(pool, term.ty, &mut th, &mut term_seen);
                acc ^= th.finish();
            }
            acc.hash(hasher);
        }
    }
    seen.remove(&t);
}
