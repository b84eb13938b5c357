//! Logical-to-physical register map table.
//!
//! One instance serves as the speculative map (RMT), reflecting every
//! dispatched rename, and a second as the architectural map (AMT),
//! reflecting committed state only. Both start as the identity mapping:
//! logical register `r` backed by physical register `p(r)`. The AMT is
//! written solely at retirement; squash copies it wholesale over the RMT.

use crate::common::{LogReg, PhysReg};

/// Fixed-size map from logical register to its backing physical register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTable {
    entries: Box<[PhysReg]>,
}

impl MapTable {
    /// Creates an identity map over `logical_regs` registers.
    pub fn identity(logical_regs: usize) -> Self {
        Self {
            entries: (0..logical_regs).map(PhysReg).collect(),
        }
    }

    /// Number of logical registers mapped.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table maps no registers. Never holds for a valid
    /// configuration; present for container-API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current physical backing of `reg`.
    #[inline]
    pub fn get(&self, reg: LogReg) -> PhysReg {
        self.entries[reg.0]
    }

    /// Points `reg` at a new physical register.
    #[inline]
    pub fn set(&mut self, reg: LogReg, phys: PhysReg) {
        self.entries[reg.0] = phys;
    }

    /// Overwrites this table with the contents of `other` (squash: AMT over
    /// RMT; misprediction: checkpoint over RMT).
    pub fn copy_from(&mut self, other: &Self) {
        self.entries.copy_from_slice(&other.entries);
    }

    /// Returns true if a physical register appears anywhere in the table.
    pub fn maps(&self, phys: PhysReg) -> bool {
        self.entries.contains(&phys)
    }
}
