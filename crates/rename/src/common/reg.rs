//! Strong register index and branch mask types.
//!
//! This module defines the index types shared by every renamer component. It provides:
//! 1. **Type Safety:** Distinguishes logical register names from physical register IDs at compile time.
//! 2. **Branch Tags:** Identifies the checkpoint slot owned by an in-flight branch.
//! 3. **Branch Masks:** Fixed-width bit vector tracking which checkpoint slots are occupied.

use std::fmt;

/// A logical (architectural) register name, as visible in the instruction set.
///
/// Logical registers are finite and fixed in count; they index the speculative
/// and architectural map tables directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogReg(pub usize);

/// A physical register ID: an index into the physical register file.
///
/// Many more physical registers exist than logical ones; the surplus lives in
/// the free list until the rename stage claims it for a destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysReg(pub usize);

/// Identifies the checkpoint slot owned by one in-flight branch.
///
/// The tag doubles as the branch's bit position in the [`BranchMask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BranchTag(pub usize);

impl fmt::Display for LogReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for BranchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// Global branch mask: one bit per outstanding (unresolved) branch.
///
/// A set bit means a checkpoint exists for that branch and it has not yet
/// resolved. The mask is at most 64 bits wide; the configured checkpoint
/// count bounds which bits may ever be set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchMask(pub u64);

impl BranchMask {
    /// Width limit imposed by the `u64` backing store.
    pub const MAX_WIDTH: usize = u64::BITS as usize;

    /// Returns true if no branch is outstanding.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if `tag`'s bit is set.
    #[inline]
    pub const fn contains(self, tag: BranchTag) -> bool {
        self.0 & (1 << tag.0) != 0
    }

    /// Sets `tag`'s bit.
    #[inline]
    pub const fn insert(&mut self, tag: BranchTag) {
        self.0 |= 1 << tag.0;
    }

    /// Clears `tag`'s bit.
    #[inline]
    pub const fn remove(&mut self, tag: BranchTag) {
        self.0 &= !(1 << tag.0);
    }

    /// Number of set bits (outstanding branches).
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Lowest clear bit position below `width`, or `None` if all are set.
    ///
    /// Picking the lowest clear index keeps checkpoint allocation
    /// deterministic for a given instruction stream.
    pub fn lowest_clear(self, width: usize) -> Option<BranchTag> {
        (0..width).map(BranchTag).find(|&tag| !self.contains(tag))
    }
}

impl fmt::Display for BranchMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}
