//! The type arena.
//!
//! All type nodes live in one append-only [`TypePool`]. An [`Idx`] into the
//! pool is the canonical handle for a type: two indices are the same type
//! exactly when they are equal, once deduplication (through a
//! [`Context`](crate::Context)) has had a chance to run.
//!
//! The first [`Idx::PRE_INTERNED`] slots are fixed: the predeclared basic
//! types plus `any` and `comparable`, at the indices named on [`Idx`].

mod construct;
mod format;

use veld_stack::ensure_sufficient_stack;

use crate::flags::BasicInfo;
use crate::subst::{subst, SubstMap};
use crate::ty::{BasicData, BasicKind, Expansion, InterfaceData, Type};
use crate::Idx;

/// Owns every type node. Append-only; nodes are never removed and, once
/// finalized, never structurally changed.
pub struct TypePool {
    types: Vec<Type>,
    next_tparam_id: u32,
}

impl TypePool {
    /// Create a pool seeded with the predeclared types.
    pub fn new() -> Self {
        let mut pool = TypePool {
            types: Vec::with_capacity(64),
            next_tparam_id: 0,
        };
        pool.intern_predeclared();
        pool
    }

    fn intern_predeclared(&mut self) {
        use BasicInfo as I;
        use BasicKind as K;

        let ordered_int = I::INTEGER.union(I::ORDERED);
        let ordered_uint = ordered_int.union(I::UNSIGNED);
        let ordered_float = I::FLOAT.union(I::ORDERED);

        let basics: [(Idx, K, I, &'static str); 28] = [
            (Idx::INVALID, K::Invalid, I::empty(), "invalid type"),
            (Idx::BOOL, K::Bool, I::BOOLEAN, "bool"),
            (Idx::INT, K::Int, ordered_int, "int"),
            (Idx::INT8, K::Int8, ordered_int, "int8"),
            (Idx::INT16, K::Int16, ordered_int, "int16"),
            (Idx::INT32, K::Int32, ordered_int, "int32"),
            (Idx::INT64, K::Int64, ordered_int, "int64"),
            (Idx::UINT, K::Uint, ordered_uint, "uint"),
            (Idx::UINT8, K::Uint8, ordered_uint, "uint8"),
            (Idx::UINT16, K::Uint16, ordered_uint, "uint16"),
            (Idx::UINT32, K::Uint32, ordered_uint, "uint32"),
            (Idx::UINT64, K::Uint64, ordered_uint, "uint64"),
            (Idx::UINTPTR, K::Uintptr, ordered_uint, "uintptr"),
            (Idx::FLOAT32, K::Float32, ordered_float, "float32"),
            (Idx::FLOAT64, K::Float64, ordered_float, "float64"),
            (Idx::COMPLEX64, K::Complex64, I::COMPLEX, "complex64"),
            (Idx::COMPLEX128, K::Complex128, I::COMPLEX, "complex128"),
            (
                Idx::STR,
                K::Str,
                I::STRING.union(I::ORDERED),
                "string",
            ),
            (
                Idx::UNSAFE_POINTER,
                K::UnsafePointer,
                I::empty(),
                "unsafe pointer",
            ),
            (
                Idx::UNTYPED_BOOL,
                K::UntypedBool,
                I::BOOLEAN.union(I::UNTYPED),
                "untyped bool",
            ),
            (
                Idx::UNTYPED_INT,
                K::UntypedInt,
                ordered_int.union(I::UNTYPED),
                "untyped int",
            ),
            (
                Idx::UNTYPED_RUNE,
                K::UntypedRune,
                ordered_int.union(I::UNTYPED),
                "untyped rune",
            ),
            (
                Idx::UNTYPED_FLOAT,
                K::UntypedFloat,
                ordered_float.union(I::UNTYPED),
                "untyped float",
            ),
            (
                Idx::UNTYPED_COMPLEX,
                K::UntypedComplex,
                I::COMPLEX.union(I::UNTYPED),
                "untyped complex",
            ),
            (
                Idx::UNTYPED_STR,
                K::UntypedStr,
                I::STRING.union(I::ORDERED).union(I::UNTYPED),
                "untyped string",
            ),
            (Idx::UNTYPED_NIL, K::UntypedNil, I::UNTYPED, "untyped nil"),
            (Idx::BYTE, K::Uint8, ordered_uint, "byte"),
            (Idx::RUNE, K::Int32, ordered_int, "rune"),
        ];

        for (idx, kind, info, name) in basics {
            debug_assert_eq!(idx.raw() as usize, self.types.len());
            self.types.push(Type::Basic(BasicData { kind, info, name }));
        }

        // any: the empty interface.
        debug_assert_eq!(Idx::ANY.raw() as usize, self.types.len());
        self.types.push(Type::Interface(InterfaceData {
            methods: Vec::new(),
            embeddeds: Vec::new(),
            comparable: false,
            tset: None,
        }));

        // comparable: the marker interface requiring comparability.
        debug_assert_eq!(Idx::COMPARABLE.raw() as usize, self.types.len());
        self.types.push(Type::Interface(InterfaceData {
            methods: Vec::new(),
            embeddeds: Vec::new(),
            comparable: true,
            tset: None,
        }));
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        // The predeclared types are always present.
        false
    }

    /// Look up a node. Panics on [`Idx::NONE`] or an out-of-range index.
    #[inline]
    pub fn get(&self, idx: Idx) -> &Type {
        &self.types[idx.raw() as usize]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, idx: Idx) -> &mut Type {
        &mut self.types[idx.raw() as usize]
    }

    pub(crate) fn push(&mut self, ty: Type) -> Idx {
        let raw = u32::try_from(self.types.len()).unwrap_or_else(|_| {
            panic!("type pool overflow: more than {} types", u32::MAX)
        });
        self.types.push(ty);
        Idx::from_raw(raw)
    }

    pub(crate) fn fresh_tparam_id(&mut self) -> u32 {
        let id = self.next_tparam_id;
        self.next_tparam_id += 1;
        id
    }

    /// Resolve alias chains to the first non-alias node. Does not expand
    /// instances and does not look through Named or type parameters.
    pub fn unalias(&self, mut idx: Idx) -> Idx {
        while let Type::Alias(a) = self.get(idx) {
            idx = a.aliased;
        }
        idx
    }

    /// The underlying type: look through aliases, named types (expanding
    /// instances on demand), and type parameters (to their bound).
    pub fn underlying(&mut self, mut idx: Idx) -> Idx {
        loop {
            match self.get(idx) {
                Type::Alias(a) => idx = a.aliased,
                Type::Named(_) => {
                    self.expand_named(idx);
                    let Type::Named(n) = self.get(idx) else {
                        unreachable!()
                    };
                    if n.underlying.is_none() {
                        // Expansion in progress on the stack above us.
                        return Idx::INVALID;
                    }
                    idx = n.underlying;
                }
                Type::TypeParam(tp) => idx = tp.bound,
                _ => return idx,
            }
        }
    }

    /// Resolve a lazily created Named instance: substitute the origin's
    /// underlying type and method signatures with the instance's type
    /// arguments. Idempotent; a no-op for origins and non-named types.
    ///
    /// Panics if the instance was created with a mismatched argument count
    /// and never validated.
    #[tracing::instrument(level = "trace", skip(self))]
    pub(crate) fn expand_named(&mut self, idx: Idx) {
        let Type::Named(n) = self.get(idx) else {
            return;
        };
        let Some(inst) = &n.inst else { return };
        if inst.expansion != Expansion::Unexpanded {
            return;
        }

        let orig = inst.orig;
        let targs = inst.targs.clone();
        let ctxt = inst.ctxt.clone();

        let Type::Named(orig_data) = self.get(orig) else {
            unreachable!("instance origin is always a named type")
        };
        let tparams = orig_data.tparams.clone();
        let orig_underlying = orig_data.underlying;
        let orig_methods = orig_data.methods.clone();

        assert_eq!(
            targs.len(),
            tparams.len(),
            "instantiating {}: got {} type arguments, want {}",
            self.get(orig).kind_name(),
            targs.len(),
            tparams.len(),
        );

        {
            let Type::Named(n) = self.get_mut(idx) else {
                unreachable!()
            };
            let Some(inst) = &mut n.inst else {
                unreachable!()
            };
            inst.expansion = Expansion::Expanding;
        }

        let smap = SubstMap::new(self, &tparams, &targs);
        let underlying = ensure_sufficient_stack(|| {
            subst(self, orig_underlying, &smap, Some(idx), &ctxt)
        });
        let methods = orig_methods
            .iter()
            .map(|m| {
                let sig = ensure_sufficient_stack(|| {
                    subst(self, m.sig, &smap, Some(idx), &ctxt)
                });
                crate::ty::Method { name: m.name, sig }
            })
            .collect();

        let Type::Named(n) = self.get_mut(idx) else {
            unreachable!()
        };
        n.underlying = underlying;
        n.methods = methods;
        let Some(inst) = &mut n.inst else {
            unreachable!()
        };
        inst.expansion = Expansion::Expanded;
    }

    /// The generic origin of an instance, or the type itself.
    pub fn origin(&self, idx: Idx) -> Idx {
        match self.get(idx) {
            Type::Named(n) => n.inst.as_ref().map_or(idx, |i| i.orig),
            Type::Alias(a) => a.orig.unwrap_or(idx),
            _ => idx,
        }
    }

    /// Type arguments of an instantiated type, if any.
    pub fn type_args(&self, idx: Idx) -> &[Idx] {
        match self.get(idx) {
            Type::Named(n) => n.inst.as_ref().map_or(&[], |i| &i.targs),
            Type::Alias(a) => &a.targs,
            _ => &[],
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}
