//! Type representation and generic instantiation for the Veld compiler.
//!
//! Types live in an append-only [`TypePool`]; an [`Idx`] into the pool is
//! the canonical handle, and canonical types compare by index. Generic
//! named types, aliases, and signatures are instantiated through
//! [`instantiate`], deduplicated per [`Context`]: one call site's
//! `Pair<K, V>` is the same node as another's.
//!
//! The crate also answers the structural questions the checker asks of
//! types: identity ([`identical`]), comparability ([`comparable`]),
//! interface satisfaction ([`implements`]), and the basic-type
//! classification predicates.

mod comparable;
mod context;
mod error;
mod flags;
mod fold;
mod identity;
mod idx;
mod instantiate;
mod pool;
mod predicates;
mod subst;
mod ty;
mod typeset;

pub use comparable::{comparable, comparable_type};
pub use context::Context;
pub use error::InstantiationError;
pub use flags::BasicInfo;
pub use fold::Const;
pub use identity::{identical, identical_ignoring_tags, identical_instance, TypeComparer};
pub use idx::Idx;
pub use instantiate::instantiate;
pub use pool::TypePool;
pub use predicates::{
    all_basic, all_boolean, all_integer, all_numeric, all_ordered, all_string, default_type,
    has_nil, is_basic, is_boolean, is_complex, is_const_type, is_float, is_generic, is_integer,
    is_interface, is_numeric, is_ordered, is_string, is_type_param, is_unsigned, is_untyped,
    is_valid, max_type,
};
pub use subst::{substitute, SubstMap};
pub use ty::{
    AliasData, ArrayData, BasicData, BasicKind, ChanData, ChanDir, Expansion, Field,
    InterfaceData, MapData, Method, NamedData, NamedInstance, PointerData, SignatureData,
    SliceData, StructData, Term, Type, TypeParamData, UnionData,
};
pub use typeset::{implements, type_set, TypeSet};
