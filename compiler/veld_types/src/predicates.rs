//! Simple classification predicates over types.
//!
//! The `is_*` family looks at the underlying type only; the `all_*`
//! family additionally holds for a type parameter when every type in its
//! constraint set qualifies, which is what operator checking on generic
//! code needs.

use crate::flags::BasicInfo;
use crate::ty::{BasicKind, Type};
use crate::typeset::type_set;
use crate::{Idx, TypePool};

pub fn is_valid(pool: &TypePool, t: Idx) -> bool {
    !t.is_none() && !pool.unalias(t).is_invalid()
}

/// Does the underlying type carry all of `info`? Type parameters answer
/// `false`; use the `all_*` forms for them.
pub fn is_basic(pool: &mut TypePool, t: Idx, info: BasicInfo) -> bool {
    if is_type_param(pool, t) {
        return false;
    }
    let under = pool.underlying(t);
    match pool.get(under) {
        Type::Basic(b) => b.info.is(info),
        _ => false,
    }
}

pub fn is_boolean(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::BOOLEAN)
}

pub fn is_integer(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::INTEGER)
}

pub fn is_unsigned(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::UNSIGNED)
}

pub fn is_float(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::FLOAT)
}

pub fn is_complex(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::COMPLEX)
}

pub fn is_numeric(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::NUMERIC)
}

pub fn is_string(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::STRING)
}

pub fn is_untyped(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::UNTYPED)
}

pub fn is_ordered(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::ORDERED)
}

pub fn is_const_type(pool: &mut TypePool, t: Idx) -> bool {
    is_basic(pool, t, BasicInfo::CONST_TYPE)
}

/// Like [`is_basic`], but a type parameter qualifies when every type in
/// its constraint set does. An unrestricted constraint never qualifies.
pub fn all_basic(pool: &mut TypePool, t: Idx, info: BasicInfo) -> bool {
    if !is_type_param(pool, t) {
        return is_basic(pool, t, info);
    }
    let bound = pool.underlying(t);
    if !matches!(pool.get(bound), Type::Interface(_)) {
        return false;
    }
    let Some(terms) = type_set(pool, bound).terms else {
        return false;
    };
    !terms.is_empty() && terms.into_iter().all(|term| is_basic(pool, term.ty, info))
}

pub fn all_boolean(pool: &mut TypePool, t: Idx) -> bool {
    all_basic(pool, t, BasicInfo::BOOLEAN)
}

pub fn all_integer(pool: &mut TypePool, t: Idx) -> bool {
    all_basic(pool, t, BasicInfo::INTEGER)
}

pub fn all_numeric(pool: &mut TypePool, t: Idx) -> bool {
    all_basic(pool, t, BasicInfo::NUMERIC)
}

pub fn all_string(pool: &mut TypePool, t: Idx) -> bool {
    all_basic(pool, t, BasicInfo::STRING)
}

pub fn all_ordered(pool: &mut TypePool, t: Idx) -> bool {
    all_basic(pool, t, BasicInfo::ORDERED)
}

pub fn is_type_param(pool: &TypePool, t: Idx) -> bool {
    matches!(pool.get(pool.unalias(t)), Type::TypeParam(_))
}

pub fn is_interface(pool: &mut TypePool, t: Idx) -> bool {
    if is_type_param(pool, t) {
        return false;
    }
    let under = pool.underlying(t);
    matches!(pool.get(under), Type::Interface(_))
}

/// A generic (uninstantiated, parameterized) type.
pub fn is_generic(pool: &TypePool, t: Idx) -> bool {
    let t = pool.unalias(t);
    pool.get(t)
        .tparams()
        .is_some_and(|tps| !tps.is_empty())
        && pool.type_args(t).is_empty()
}

/// Can `nil` be assigned to values of this type?
pub fn has_nil(pool: &mut TypePool, t: Idx) -> bool {
    let under = pool.underlying(t);
    match pool.get(under) {
        Type::Basic(b) => matches!(b.kind, BasicKind::UnsafePointer | BasicKind::UntypedNil),
        Type::Slice(_)
        | Type::Pointer(_)
        | Type::Map(_)
        | Type::Chan(_)
        | Type::Signature(_)
        | Type::Interface(_) => true,
        _ => false,
    }
}

/// The type an untyped constant defaults to in an untyped context.
/// Typed operands and `untyped nil` come back unchanged.
pub fn default_type(pool: &TypePool, t: Idx) -> Idx {
    let under = pool.unalias(t);
    if let Type::Basic(b) = pool.get(under) {
        return match b.kind {
            BasicKind::UntypedBool => Idx::BOOL,
            BasicKind::UntypedInt => Idx::INT,
            BasicKind::UntypedRune => Idx::RUNE,
            BasicKind::UntypedFloat => Idx::FLOAT64,
            BasicKind::UntypedComplex => Idx::COMPLEX128,
            BasicKind::UntypedStr => Idx::STR,
            _ => t,
        };
    }
    t
}

/// The "larger" of two numeric types for constant arithmetic: equal types
/// stay put, otherwise both must be untyped numeric and the wider kind
/// wins (int < rune < float < complex). Anything else has no maximum.
pub fn max_type(pool: &TypePool, x: Idx, y: Idx) -> Option<Idx> {
    if x == y {
        return Some(x);
    }
    let (Type::Basic(bx), Type::Basic(by)) = (pool.get(pool.unalias(x)), pool.get(pool.unalias(y)))
    else {
        return None;
    };
    if bx.info.is_untyped_numeric() && by.info.is_untyped_numeric() {
        return Some(if bx.kind < by.kind { y } else { x });
    }
    None
}

#[cfg(test)]
mod tests;
