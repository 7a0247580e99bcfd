//! Pre-computed basic-type metadata flags.
//!
//! Every basic type carries a `BasicInfo` bitset computed once at pool
//! creation, enabling O(1) classification queries (is-integer, is-untyped,
//! is-ordered, ...) without matching on kinds at every call site.

use bitflags::bitflags;

bitflags! {
    /// Properties of a basic type.
    ///
    /// Assigned at pool creation, never recomputed. The `all_*` predicate
    /// family tests these bits across a type parameter's entire type set.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct BasicInfo: u16 {
        /// Boolean kind.
        const BOOLEAN = 1 << 0;
        /// Integer kind (signed or unsigned).
        const INTEGER = 1 << 1;
        /// Unsigned integer kind.
        const UNSIGNED = 1 << 2;
        /// Floating-point kind.
        const FLOAT = 1 << 3;
        /// Complex kind.
        const COMPLEX = 1 << 4;
        /// String kind.
        const STRING = 1 << 5;
        /// Untyped constant kind.
        const UNTYPED = 1 << 6;
        /// Supports `<`/`<=`/`>`/`>=`.
        const ORDERED = 1 << 7;
    }
}

impl BasicInfo {
    /// Any numeric kind.
    pub const NUMERIC: Self =
        Self::from_bits_truncate(Self::INTEGER.bits() | Self::FLOAT.bits() | Self::COMPLEX.bits());

    /// Kinds a constant expression may have.
    pub const CONST_TYPE: Self =
        Self::from_bits_truncate(Self::BOOLEAN.bits() | Self::NUMERIC.bits() | Self::STRING.bits());

    /// Check whether any of the given bits are set.
    #[inline]
    pub const fn is(self, info: Self) -> bool {
        self.intersects(info)
    }

    /// Check the untyped bit.
    #[inline]
    pub const fn is_untyped(self) -> bool {
        self.contains(Self::UNTYPED)
    }

    /// Check for untyped numeric kinds (the `max_type` domain).
    #[inline]
    pub const fn is_untyped_numeric(self) -> bool {
        self.contains(Self::UNTYPED) && self.intersects(Self::NUMERIC)
    }
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests;
