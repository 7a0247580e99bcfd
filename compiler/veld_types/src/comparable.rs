//! Comparability: which types support `==` and `!=`.
//!
//! Two notions share one walk. Statically comparable types may be
//! compared without risk; dynamically comparable types additionally
//! include interfaces, whose comparison may still panic at run time.
//! Constraint satisfaction uses the strict (static) form, ordinary
//! expression checking the dynamic one.

use rustc_hash::FxHashSet;
use veld_ir::StringInterner;
use veld_stack::ensure_sufficient_stack;

use crate::predicates::is_type_param;
use crate::ty::{BasicKind, Type};
use crate::typeset::type_set;
use crate::{Idx, TypePool};

/// Is `t` comparable in the dynamic sense, with interface comparisons
/// allowed?
pub fn comparable(pool: &mut TypePool, t: Idx) -> bool {
    let mut seen = FxHashSet::default();
    comparable_impl(pool, t, true, &mut seen, None)
}

/// Comparability with an explanation. On failure, appends the reason a
/// component is not comparable to `cause`.
pub fn comparable_type(
    pool: &mut TypePool,
    interner: &StringInterner,
    t: Idx,
    dynamic: bool,
    cause: &mut String,
) -> bool {
    let mut seen = FxHashSet::default();
    comparable_impl(pool, t, dynamic, &mut seen, Some((interner, cause)))
}

/// Strict comparability without an explanation; used on type-set terms.
pub(crate) fn strictly_comparable(pool: &mut TypePool, t: Idx) -> bool {
    let mut seen = FxHashSet::default();
    comparable_impl(pool, t, false, &mut seen, None)
}

fn comparable_impl(
    pool: &mut TypePool,
    t: Idx,
    dynamic: bool,
    seen: &mut FxHashSet<Idx>,
    mut report: Option<(&StringInterner, &mut String)>,
) -> bool {
    // A type already on the walk proves nothing new; treat it as
    // comparable and let the enclosing frame decide.
    if !seen.insert(t) {
        return true;
    }

    let under = pool.underlying(t);
    match pool.get(under).clone() {
        // The invalid type counts as comparable to avoid follow-on errors.
        Type::Basic(b) => b.kind != BasicKind::UntypedNil,

        Type::Pointer(_) | Type::Chan(_) => true,

        Type::Struct(s) => {
            for f in &s.fields {
                let ok = ensure_sufficient_stack(|| {
                    comparable_impl(pool, f.ty, dynamic, seen, report.as_mut().map(|(i, c)| (*i, &mut **c)))
                });
                if !ok {
                    if let Some((interner, cause)) = &mut report {
                        cause.clear();
                        cause.push_str("struct containing ");
                        cause.push_str(&pool.display(f.ty, interner));
                        cause.push_str(" cannot be compared");
                    }
                    return false;
                }
            }
            true
        }

        Type::Array(a) => {
            let ok = ensure_sufficient_stack(|| {
                comparable_impl(pool, a.elem, dynamic, seen, report.as_mut().map(|(i, c)| (*i, &mut **c)))
            });
            if !ok {
                if let Some((interner, cause)) = &mut report {
                    cause.clear();
                    cause.push_str(&pool.display(a.elem, interner));
                    cause.push_str(" cannot be compared");
                }
            }
            ok
        }

        Type::Interface(_) => {
            if dynamic && !is_type_param(pool, t) {
                return true;
            }
            if type_set(pool, under).is_comparable(pool) {
                return true;
            }
            if let Some((interner, cause)) = &mut report {
                cause.clear();
                cause.push_str(&pool.display(t, interner));
                if is_type_param(pool, t) {
                    cause.push_str(" has no type constraint that requires comparability");
                } else {
                    cause.push_str(" is not comparable");
                }
            }
            false
        }

        _ => false,
    }
}
