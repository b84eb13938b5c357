//! Physical register file with a per-register readiness bitmap.
//!
//! Flat value storage indexed directly by physical register ID, plus a
//! companion boolean array marking which registers hold a produced value.
//! The scheduler (external) polls readiness before issuing consumers; the
//! execute stage (external) writes results and sets the flag through these
//! accessors. Renaming a destination clears readiness until the write
//! arrives.

use crate::common::PhysReg;

/// Physical register values and readiness flags.
#[derive(Debug)]
pub struct PhysRegFile {
    values: Box<[u64]>,
    ready: Box<[bool]>,
}

impl PhysRegFile {
    /// Creates a register file of `physical_regs` entries.
    ///
    /// The first `logical_regs` physical registers initially back the
    /// logical registers (identity map) and start ready; all others start
    /// not ready until written.
    pub fn new(logical_regs: usize, physical_regs: usize) -> Self {
        let mut ready = vec![false; physical_regs].into_boxed_slice();
        for slot in &mut ready[..logical_regs] {
            *slot = true;
        }
        Self {
            values: vec![0; physical_regs].into_boxed_slice(),
            ready,
        }
    }

    /// Total physical register count.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true for a zero-register machine. Never holds for a valid
    /// configuration; present for container-API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true if `reg` holds a produced value.
    #[inline]
    pub fn is_ready(&self, reg: PhysReg) -> bool {
        self.ready[reg.0]
    }

    /// Marks `reg` ready (execute stage, after writing the result).
    #[inline]
    pub fn set_ready(&mut self, reg: PhysReg) {
        self.ready[reg.0] = true;
    }

    /// Marks `reg` not ready (rename stage, on destination allocation).
    #[inline]
    pub fn clear_ready(&mut self, reg: PhysReg) {
        self.ready[reg.0] = false;
    }

    /// Reads the value of `reg`.
    #[inline]
    pub fn read(&self, reg: PhysReg) -> u64 {
        self.values[reg.0]
    }

    /// Writes the value of `reg`. Does not touch readiness; the execute
    /// stage sets the flag separately once the write is visible.
    #[inline]
    pub fn write(&mut self, reg: PhysReg, value: u64) {
        self.values[reg.0] = value;
    }
}
