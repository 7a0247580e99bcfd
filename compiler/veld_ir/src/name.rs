//! Interned identifier handle.

use std::fmt;

/// Bits of the handle that select the interner shard.
const SHARD_BITS: u32 = 4;
const LOCAL_BITS: u32 = 32 - SHARD_BITS;

/// Handle to a string held by a [`StringInterner`](crate::StringInterner).
///
/// The 32-bit payload packs the shard in the top [`SHARD_BITS`] bits and
/// the slot within that shard below. Handles from the same interner are
/// equal exactly when their strings are.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Highest slot a single shard can hand out.
    pub const MAX_LOCAL: u32 = (1 << LOCAL_BITS) - 1;

    /// How many shards an interner splits its strings across.
    pub const NUM_SHARDS: usize = 1 << SHARD_BITS;

    pub(crate) const fn pack(shard: u32, local: u32) -> Self {
        debug_assert!(shard < Self::NUM_SHARDS as u32);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << LOCAL_BITS) | local)
    }

    pub(crate) const fn shard(self) -> usize {
        (self.0 >> LOCAL_BITS) as usize
    }

    pub(crate) const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    /// The packed handle value. Stable within one interner, meaningless
    /// across interners. Used for structural hashing.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}
