//! Structural type identity.
//!
//! Canonical types compare by [`Idx`], but deduplication needs a
//! structural check to decide whether two independently built nodes are
//! the same type. The rules mirror declared-type identity: named types by
//! declaration plus arguments, type parameters by identity, everything
//! else recursively by shape.
//!
//! Interface recursion is guarded by a stack-allocated pair list, so
//! mutually embedding interfaces terminate.

use veld_stack::ensure_sufficient_stack;

use crate::ty::Type;
use crate::{Idx, TypePool};

/// Chain of interface pairs currently under comparison, threaded through
/// the recursion on the stack.
struct IfacePair<'a> {
    x: Idx,
    y: Idx,
    prev: Option<&'a IfacePair<'a>>,
}

impl IfacePair<'_> {
    fn seen(&self, x: Idx, y: Idx) -> bool {
        let mut p = Some(self);
        while let Some(pair) = p {
            if (pair.x == x && pair.y == y) || (pair.x == y && pair.y == x) {
                return true;
            }
            p = pair.prev;
        }
        false
    }
}

/// Configurable identity comparison.
#[derive(Copy, Clone, Default)]
pub struct TypeComparer {
    /// Treat struct field tags as insignificant.
    pub ignore_tags: bool,
    /// Treat the invalid type as identical to everything. Used by
    /// diagnostics paths to avoid follow-on errors.
    pub ignore_invalids: bool,
}

/// Identity under the default rules.
pub fn identical(pool: &TypePool, x: Idx, y: Idx) -> bool {
    TypeComparer::default().identical(pool, x, y)
}

/// Identity ignoring struct field tags.
pub fn identical_ignoring_tags(pool: &TypePool, x: Idx, y: Idx) -> bool {
    TypeComparer {
        ignore_tags: true,
        ..TypeComparer::default()
    }
    .identical(pool, x, y)
}

/// Do `x` and `y` name the same declaration instantiated with identical
/// type arguments? Used when deduplicating instances.
pub fn identical_instance(pool: &TypePool, x: Idx, y: Idx) -> bool {
    identical(pool, x, y)
}

impl TypeComparer {
    pub fn identical(self, pool: &TypePool, x: Idx, y: Idx) -> bool {
        self.compare(pool, x, y, None, &[])
    }

    fn compare(
        self,
        pool: &TypePool,
        x: Idx,
        y: Idx,
        p: Option<&IfacePair<'_>>,
        renames: &[(u32, u32)],
    ) -> bool {
        if x == y {
            return true;
        }
        if x.is_none() || y.is_none() {
            return false;
        }
        let x = pool.unalias(x);
        let y = pool.unalias(y);
        if x == y {
            return true;
        }

        if self.ignore_invalids && (x.is_invalid() || y.is_invalid()) {
            return true;
        }

        ensure_sufficient_stack(|| self.compare_nodes(pool, x, y, p, renames))
    }

    fn compare_nodes(
        self,
        pool: &TypePool,
        x: Idx,
        y: Idx,
        p: Option<&IfacePair<'_>>,
        renames: &[(u32, u32)],
    ) -> bool {
        match (pool.get(x), pool.get(y)) {
            (Type::Basic(a), Type::Basic(b)) => a.kind == b.kind,

            (Type::Named(a), Type::Named(b)) => {
                if a.decl != b.decl {
                    return false;
                }
                let xargs = pool.type_args(x);
                let yargs = pool.type_args(y);
                xargs.len() == yargs.len()
                    && xargs
                        .iter()
                        .zip(yargs)
                        .all(|(&xa, &ya)| self.compare(pool, xa, ya, p, renames))
            }

            // Parameters are identical only to themselves, except for the
            // bound parameters of the enclosing signatures, which match
            // positionally.
            (Type::TypeParam(a), Type::TypeParam(b)) => {
                a.id == b.id || renames.contains(&(a.id, b.id))
            }

            (Type::Struct(a), Type::Struct(b)) => {
                a.fields.len() == b.fields.len()
                    && a.fields.iter().zip(&b.fields).all(|(fa, fb)| {
                        fa.name == fb.name
                            && fa.embedded == fb.embedded
                            && (self.ignore_tags || fa.same_tag(fb))
                            && self.compare(pool, fa.ty, fb.ty, p, renames)
                    })
            }

            (Type::Signature(a), Type::Signature(b)) => {
                if a.variadic != b.variadic
                    || a.tparams.len() != b.tparams.len()
                    || a.params.len() != b.params.len()
                    || a.results.len() != b.results.len()
                {
                    return false;
                }
                // Corresponding bound parameters match positionally, so
                // alpha-equivalent generic signatures are identical.
                let mut renames = renames.to_vec();
                for (&ta, &tb) in a.tparams.iter().zip(&b.tparams) {
                    let (Type::TypeParam(pa), Type::TypeParam(pb)) =
                        (pool.get(ta), pool.get(tb))
                    else {
                        return false;
                    };
                    renames.push((pa.id, pb.id));
                }
                a.tparams.iter().zip(&b.tparams).all(|(&ta, &tb)| {
                    let (Type::TypeParam(pa), Type::TypeParam(pb)) =
                        (pool.get(ta), pool.get(tb))
                    else {
                        return false;
                    };
                    self.compare(pool, pa.bound, pb.bound, p, &renames)
                }) && a
                    .params
                    .iter()
                    .zip(&b.params)
                    .all(|(&pa, &pb)| self.compare(pool, pa, pb, p, &renames))
                    && a.results
                        .iter()
                        .zip(&b.results)
                        .all(|(&ra, &rb)| self.compare(pool, ra, rb, p, &renames))
            }

            (Type::Interface(a), Type::Interface(b)) => {
                if a.comparable != b.comparable
                    || a.methods.len() != b.methods.len()
                    || a.embeddeds.len() != b.embeddeds.len()
                {
                    return false;
                }
                // Assume the pair is identical while comparing its parts;
                // revisiting it means the cycle is consistent so far.
                if p.is_some_and(|p| p.seen(x, y)) {
                    return true;
                }
                let pair = IfacePair { x, y, prev: p };
                // Declaration order is insignificant: methods match by
                // name (unique within an interface) and embedded elements
                // as a set.
                a.methods.iter().all(|ma| {
                    b.methods.iter().any(|mb| {
                        ma.name == mb.name
                            && self.compare(pool, ma.sig, mb.sig, Some(&pair), renames)
                    })
                }) && a.embeddeds.iter().all(|&ea| {
                    b.embeddeds
                        .iter()
                        .any(|&eb| self.compare(pool, ea, eb, Some(&pair), renames))
                }) && b.embeddeds.iter().all(|&eb| {
                    a.embeddeds
                        .iter()
                        .any(|&ea| self.compare(pool, ea, eb, Some(&pair), renames))
                })
            }

            (Type::Array(a), Type::Array(b)) => {
                a.len == b.len && self.compare(pool, a.elem, b.elem, p, renames)
            }

            (Type::Slice(a), Type::Slice(b)) => self.compare(pool, a.elem, b.elem, p, renames),

            (Type::Pointer(a), Type::Pointer(b)) => {
                self.compare(pool, a.elem, b.elem, p, renames)
            }

            (Type::Map(a), Type::Map(b)) => {
                self.compare(pool, a.key, b.key, p, renames)
                    && self.compare(pool, a.value, b.value, p, renames)
            }

            (Type::Chan(a), Type::Chan(b)) => {
                a.dir == b.dir && self.compare(pool, a.elem, b.elem, p, renames)
            }

            (Type::Union(a), Type::Union(b)) => {
                // Order-insensitive: each side's terms must appear in the
                // other. Sets are small, so the quadratic scan is fine.
                a.terms.len() == b.terms.len()
                    && a.terms.iter().all(|ta| {
                        b.terms.iter().any(|tb| {
                            ta.tilde == tb.tilde && self.compare(pool, ta.ty, tb.ty, p, renames)
                        })
                    })
                    && b.terms.iter().all(|tb| {
                        a.terms.iter().any(|ta| {
                            ta.tilde == tb.tilde && self.compare(pool, ta.ty, tb.ty, p, renames)
                        })
                    })
            }

            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
