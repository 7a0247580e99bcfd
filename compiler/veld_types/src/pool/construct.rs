//! Constructors for composite type nodes.
//!
//! Construction is the only place nodes are written after creation, and
//! only until they are finalized (an interface's type set computed, a
//! named type's underlying set). The mutators panic if called later.

use veld_ir::{DeclId, Name};

use crate::fold::Const;
use crate::ty::{
    AliasData, ArrayData, ChanData, ChanDir, Field, InterfaceData, MapData,
    Method, NamedData, PointerData, SignatureData, SliceData, StructData,
    Term, Type, TypeParamData, UnionData,
};
use crate::{Idx, TypePool};

impl TypePool {
    pub fn struct_of(&mut self, fields: Vec<Field>) -> Idx {
        self.push(Type::Struct(StructData { fields }))
    }

    pub fn array(&mut self, len: u64, elem: Idx) -> Idx {
        self.push(Type::Array(ArrayData { len, elem }))
    }

    /// Build an array whose length comes from a constant expression. The
    /// constant is folded first; a non-integer or negative length yields
    /// the invalid type.
    pub fn array_from_const(&mut self, len: &Const, elem: Idx) -> Idx {
        match len.fold() {
            Const::Int(n) if n >= 0 => self.array(n as u64, elem),
            _ => Idx::INVALID,
        }
    }

    pub fn slice(&mut self, elem: Idx) -> Idx {
        self.push(Type::Slice(SliceData { elem }))
    }

    pub fn pointer(&mut self, elem: Idx) -> Idx {
        self.push(Type::Pointer(PointerData { elem }))
    }

    pub fn map_of(&mut self, key: Idx, value: Idx) -> Idx {
        self.push(Type::Map(MapData { key, value }))
    }

    pub fn chan(&mut self, dir: ChanDir, elem: Idx) -> Idx {
        self.push(Type::Chan(ChanData { dir, elem }))
    }

    pub fn signature(
        &mut self,
        tparams: Vec<Idx>,
        params: Vec<Idx>,
        results: Vec<Idx>,
        variadic: bool,
    ) -> Idx {
        self.push(Type::Signature(SignatureData {
            tparams,
            params,
            results,
            variadic,
        }))
    }

    pub fn interface(&mut self, methods: Vec<Method>, embeddeds: Vec<Idx>) -> Idx {
        self.push(Type::Interface(InterfaceData {
            methods,
            embeddeds,
            comparable: false,
            tset: None,
        }))
    }

    pub fn union(&mut self, terms: Vec<Term>) -> Idx {
        self.push(Type::Union(UnionData { terms }))
    }

    /// Create a fresh type parameter. Each call mints a new identity even
    /// for the same name; substitution respects only the identity.
    pub fn type_param(&mut self, name: Name, bound: Idx) -> Idx {
        let id = self.fresh_tparam_id();
        self.push(Type::TypeParam(TypeParamData { id, name, bound }))
    }

    /// Declare a named type. Pass [`Idx::NONE`] as `underlying` to build a
    /// recursive declaration, then finish it with
    /// [`set_named_underlying`](Self::set_named_underlying).
    pub fn named(
        &mut self,
        decl: DeclId,
        name: Name,
        tparams: Vec<Idx>,
        underlying: Idx,
        methods: Vec<Method>,
    ) -> Idx {
        self.push(Type::Named(NamedData {
            decl,
            name,
            tparams,
            underlying,
            methods,
            inst: None,
        }))
    }

    pub fn alias(
        &mut self,
        decl: DeclId,
        name: Name,
        tparams: Vec<Idx>,
        aliased: Idx,
    ) -> Idx {
        self.push(Type::Alias(AliasData {
            decl,
            name,
            tparams,
            targs: Vec::new(),
            aliased,
            orig: None,
        }))
    }

    /// Finish a recursive named declaration. Panics if the target is not a
    /// named origin or already has an underlying type.
    pub fn set_named_underlying(&mut self, named: Idx, underlying: Idx) {
        match self.get_mut(named) {
            Type::Named(n) if n.inst.is_none() => {
                assert!(
                    n.underlying.is_none(),
                    "underlying type already set"
                );
                n.underlying = underlying;
            }
            t => panic!("set_named_underlying on {}", t.kind_name()),
        }
    }

    /// Add a method requirement to an interface under construction.
    /// Panics once the type set has been computed.
    pub fn add_interface_method(&mut self, iface: Idx, method: Method) {
        match self.get_mut(iface) {
            Type::Interface(i) => {
                assert!(i.tset.is_none(), "interface already finalized");
                i.methods.push(method);
            }
            t => panic!("add_interface_method on {}", t.kind_name()),
        }
    }

    /// Set the embedded elements of an interface under construction.
    /// Panics once the type set has been computed.
    pub fn set_interface_embeddeds(&mut self, iface: Idx, embeddeds: Vec<Idx>) {
        match self.get_mut(iface) {
            Type::Interface(i) => {
                assert!(i.tset.is_none(), "interface already finalized");
                i.embeddeds = embeddeds;
            }
            t => panic!("set_interface_embeddeds on {}", t.kind_name()),
        }
    }
}
