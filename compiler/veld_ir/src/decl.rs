//! Declaration identity handles.

use std::fmt;

/// Identity of a user declaration.
///
/// Minted by declaration checking, one per `type`/`func` declaration.
/// The type system compares these to answer "did these two types originate
/// in the same declaration?" - the origin-identity test behind instance
/// deduplication. Two structurally identical types from different
/// declarations are distinct types.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    /// Create from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DeclId(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}
