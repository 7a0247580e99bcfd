//! The type node model.
//!
//! A [`Type`] is one node in the directed, possibly cyclic type graph held
//! by the [`TypePool`](crate::TypePool). Children are referenced by
//! [`Idx`], never boxed, so recursive types are just cycles of indices.
//!
//! Nodes are immutable once finalized; the only fields written after
//! construction are the lazily derived ones (a Named instance's expansion,
//! an Interface's cached type set), each computed at most once.

use veld_ir::{DeclId, Name};

use crate::context::Context;
use crate::flags::BasicInfo;
use crate::typeset::TypeSet;
use crate::Idx;

/// Kind of a basic type.
///
/// The untyped numeric kinds are declared in widening order
/// (int < rune < float < complex) so `max_type` can compare them directly.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum BasicKind {
    Invalid,

    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Str,
    UnsafePointer,

    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedStr,
    UntypedNil,
}

/// Payload of a basic type node.
#[derive(Clone, Debug)]
pub struct BasicData {
    pub kind: BasicKind,
    pub info: BasicInfo,
    /// Display name. `byte` and `rune` share a kind with uint8/int32 but
    /// render under their own names.
    pub name: &'static str,
}

/// Direction of a channel type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ChanDir {
    SendRecv,
    SendOnly,
    RecvOnly,
}

/// A struct field.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: Name,
    pub ty: Idx,
    pub embedded: bool,
    /// Field tag text; `None` and `Some("")` compare equal.
    pub tag: Option<Box<str>>,
}

impl Field {
    /// Create a plain (non-embedded, untagged) field.
    pub fn new(name: Name, ty: Idx) -> Self {
        Field {
            name,
            ty,
            embedded: false,
            tag: None,
        }
    }

    fn tag_text(&self) -> &str {
        self.tag.as_deref().unwrap_or("")
    }

    /// Compare tags treating a missing tag as empty text.
    pub fn same_tag(&self, other: &Field) -> bool {
        self.tag_text() == other.tag_text()
    }
}

/// A method requirement: name plus signature type.
#[derive(Clone, Debug)]
pub struct Method {
    pub name: Name,
    pub sig: Idx,
}

/// A type term of a union or type set. `tilde` terms match any type whose
/// underlying type is the term's type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Term {
    pub tilde: bool,
    pub ty: Idx,
}

impl Term {
    /// A plain (non-tilde) term.
    pub const fn exact(ty: Idx) -> Self {
        Term { tilde: false, ty }
    }

    /// A tilde term (`~T`).
    pub const fn approx(ty: Idx) -> Self {
        Term { tilde: true, ty }
    }
}

/// Payload of a struct type.
#[derive(Clone, Debug)]
pub struct StructData {
    pub fields: Vec<Field>,
}

/// Payload of an array type.
#[derive(Clone, Debug)]
pub struct ArrayData {
    pub len: u64,
    pub elem: Idx,
}

/// Payload of a slice type.
#[derive(Clone, Debug)]
pub struct SliceData {
    pub elem: Idx,
}

/// Payload of a pointer type.
#[derive(Clone, Debug)]
pub struct PointerData {
    pub elem: Idx,
}

/// Payload of a map type.
#[derive(Clone, Debug)]
pub struct MapData {
    pub key: Idx,
    pub value: Idx,
}

/// Payload of a channel type.
#[derive(Clone, Debug)]
pub struct ChanData {
    pub dir: ChanDir,
    pub elem: Idx,
}

/// Payload of a union element (constraint terms).
#[derive(Clone, Debug)]
pub struct UnionData {
    pub terms: Vec<Term>,
}

/// Payload of a function signature.
///
/// A non-empty `tparams` list marks a generic signature; instantiation
/// clears it (the instance is no longer generic).
#[derive(Clone, Debug)]
pub struct SignatureData {
    pub tparams: Vec<Idx>,
    pub params: Vec<Idx>,
    pub results: Vec<Idx>,
    pub variadic: bool,
}

/// Payload of an interface type.
#[derive(Clone, Debug)]
pub struct InterfaceData {
    pub methods: Vec<Method>,
    pub embeddeds: Vec<Idx>,
    /// Set on the predeclared `comparable` interface.
    pub comparable: bool,
    /// Lazily computed type set; frozen after first computation.
    pub tset: Option<TypeSet>,
}

/// Payload of a type parameter.
///
/// Substitution maps are keyed by `id` - parameter identity, never name.
#[derive(Clone, Debug)]
pub struct TypeParamData {
    pub id: u32,
    pub name: Name,
    /// Constraint bound; always an interface (possibly `any`).
    pub bound: Idx,
}

/// Expansion state of a lazily instantiated Named type.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Expansion {
    /// Instance created, underlying not yet substituted.
    Unexpanded,
    /// Substitution in progress; self-references resolve through the
    /// instance's own context.
    Expanding,
    /// Underlying and methods fully substituted.
    Expanded,
}

/// Instance data attached to an instantiated Named type.
#[derive(Clone, Debug)]
pub struct NamedInstance {
    /// The generic origin. Never itself an instance.
    pub orig: Idx,
    /// Type arguments, in declaration order of the parameters.
    pub targs: Vec<Idx>,
    pub expansion: Expansion,
    /// The context this instance was recorded in; expansion substitutes
    /// through it so in-progress self-references stay canonical.
    pub ctxt: Context,
}

/// Payload of a user-declared (defined) type.
#[derive(Clone, Debug)]
pub struct NamedData {
    /// Declaration identity; instances share their origin's `decl`.
    pub decl: DeclId,
    pub name: Name,
    /// Type parameters of a generic origin; empty on instances.
    pub tparams: Vec<Idx>,
    /// Declared underlying type, or [`Idx::NONE`] on an unexpanded instance.
    pub underlying: Idx,
    pub methods: Vec<Method>,
    /// Present iff this node is an instance.
    pub inst: Option<NamedInstance>,
}

/// Payload of a (possibly parameterized) type alias.
#[derive(Clone, Debug)]
pub struct AliasData {
    pub decl: DeclId,
    pub name: Name,
    /// Type parameters of a generic alias; empty on instances.
    pub tparams: Vec<Idx>,
    /// Type arguments when instantiated.
    pub targs: Vec<Idx>,
    /// The aliased type (substituted eagerly on instantiation).
    pub aliased: Idx,
    /// The generic origin for instances.
    pub orig: Option<Idx>,
}

/// A type node. Closed sum; every traversal matches exhaustively.
#[derive(Clone, Debug)]
pub enum Type {
    Basic(BasicData),
    Named(NamedData),
    Alias(AliasData),
    Signature(SignatureData),
    Interface(InterfaceData),
    TypeParam(TypeParamData),
    Struct(StructData),
    Array(ArrayData),
    Slice(SliceData),
    Pointer(PointerData),
    Map(MapData),
    Chan(ChanData),
    Union(UnionData),
}

impl Type {
    /// The type parameter list of a generic type, if this kind carries one.
    pub fn tparams(&self) -> Option<&[Idx]> {
        match self {
            Type::Named(n) => Some(&n.tparams),
            Type::Alias(a) => Some(&a.tparams),
            Type::Signature(s) => Some(&s.tparams),
            _ => None,
        }
    }

    /// Shorthand kind name for panics and traces.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Basic(_) => "basic",
            Type::Named(_) => "named",
            Type::Alias(_) => "alias",
            Type::Signature(_) => "signature",
            Type::Interface(_) => "interface",
            Type::TypeParam(_) => "type parameter",
            Type::Struct(_) => "struct",
            Type::Array(_) => "array",
            Type::Slice(_) => "slice",
            Type::Pointer(_) => "pointer",
            Type::Map(_) => "map",
            Type::Chan(_) => "chan",
            Type::Union(_) => "union",
        }
    }
}
