//! Type pool index handle.
//!
//! `Idx` is THE canonical type representation: every type node lives in a
//! [`TypePool`](crate::TypePool) and is referenced by its 32-bit index.
//! Canonical-instance identity is index equality - two `Idx` values that
//! compare equal name the same node, which is exactly the guarantee the
//! instantiation engine's deduplication maintains.
//!
//! Basic types (and the two predeclared interfaces) are pre-interned at
//! fixed indices so they can be named without a pool in hand.

use std::fmt;

/// A 32-bit index into the type pool.
///
/// Equality is index equality (O(1)). Structural questions ("do these two
/// indices denote the same type?") go through
/// [`identical`](crate::identical), not `==`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Basic types (fixed indices, pre-interned at pool creation) ===

    /// The invalid type (error sentinel, propagates silently).
    pub const INVALID: Self = Self(0);
    /// The `bool` type.
    pub const BOOL: Self = Self(1);
    /// The `int` type (native signed integer).
    pub const INT: Self = Self(2);
    /// The `int8` type.
    pub const INT8: Self = Self(3);
    /// The `int16` type.
    pub const INT16: Self = Self(4);
    /// The `int32` type.
    pub const INT32: Self = Self(5);
    /// The `int64` type.
    pub const INT64: Self = Self(6);
    /// The `uint` type (native unsigned integer).
    pub const UINT: Self = Self(7);
    /// The `uint8` type.
    pub const UINT8: Self = Self(8);
    /// The `uint16` type.
    pub const UINT16: Self = Self(9);
    /// The `uint32` type.
    pub const UINT32: Self = Self(10);
    /// The `uint64` type.
    pub const UINT64: Self = Self(11);
    /// The `uintptr` type.
    pub const UINTPTR: Self = Self(12);
    /// The `float32` type.
    pub const FLOAT32: Self = Self(13);
    /// The `float64` type.
    pub const FLOAT64: Self = Self(14);
    /// The `complex64` type.
    pub const COMPLEX64: Self = Self(15);
    /// The `complex128` type.
    pub const COMPLEX128: Self = Self(16);
    /// The `string` type.
    pub const STR: Self = Self(17);
    /// The unsafe pointer type.
    pub const UNSAFE_POINTER: Self = Self(18);

    // Untyped constant kinds.

    /// Untyped boolean constant type.
    pub const UNTYPED_BOOL: Self = Self(19);
    /// Untyped integer constant type.
    pub const UNTYPED_INT: Self = Self(20);
    /// Untyped rune constant type.
    pub const UNTYPED_RUNE: Self = Self(21);
    /// Untyped float constant type.
    pub const UNTYPED_FLOAT: Self = Self(22);
    /// Untyped complex constant type.
    pub const UNTYPED_COMPLEX: Self = Self(23);
    /// Untyped string constant type.
    pub const UNTYPED_STR: Self = Self(24);
    /// Untyped nil constant type.
    pub const UNTYPED_NIL: Self = Self(25);

    // Named alternates of uint8/int32 with their own display names.

    /// The `byte` type (alternate spelling of uint8).
    pub const BYTE: Self = Self(26);
    /// The `rune` type (alternate spelling of int32).
    pub const RUNE: Self = Self(27);

    // Predeclared interfaces.

    /// The empty interface `any` (universe type set).
    pub const ANY: Self = Self(28);
    /// The predeclared `comparable` constraint interface.
    pub const COMPARABLE: Self = Self(29);

    /// Number of pre-interned types.
    pub const PRE_INTERNED: u32 = 30;

    /// Sentinel value indicating no type (e.g. a not-yet-expanded underlying).
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a pre-interned type.
    #[inline]
    pub const fn is_pre_interned(self) -> bool {
        self.0 < Self::PRE_INTERNED
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Check if this is the invalid type.
    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => write!(f, "Idx::NONE"),
            Self::INVALID => write!(f, "Idx::INVALID"),
            _ => write!(f, "Idx({})", self.0),
        }
    }
}

// Idx is passed by value everywhere; keep it a bare u32.
const _: () = assert!(std::mem::size_of::<Idx>() == 4);
