//! The renaming unit: five components behind one per-cycle facade.
//!
//! This module composes the pieces of the register-renaming and
//! speculative-recovery unit:
//! 1. **Map Tables:** Speculative (RMT) and architectural (AMT) logical→physical maps.
//! 2. **Free List:** Circular pool of unallocated physical registers.
//! 3. **Active List:** In-order queue of in-flight instruction records.
//! 4. **Physical Register File:** Values plus per-register readiness.
//! 5. **Branch Checkpoints:** Global branch mask and RMT snapshots.
//!
//! The [`Renamer`] facade owns all five and is what the pipeline driver
//! holds. The per-cycle contract is: evaluate the stall queries first, then
//! perform at most as many allocating operations (destination renames,
//! dispatches, checkpoints) as the queries cleared. The allocating
//! operations do not re-check; a driver that overruns a stall signal hits an
//! assertion, never silent corruption.

use tracing::trace;

use crate::common::{BranchMask, BranchTag, LogReg, PhysReg};
use crate::config::RenamerConfig;
use crate::stats::RenameStats;

/// In-flight instruction queue.
pub mod active_list;
/// Branch mask and checkpoint storage.
pub mod checkpoint;
/// Free physical register pool.
pub mod free_list;
/// Speculative and architectural map tables.
pub mod map_table;
/// Physical register values and readiness.
pub mod prf;

pub use active_list::{ActiveList, ActiveListEntry, DestMapping, DispatchInfo, InstClass};
pub use checkpoint::{BranchCheckpoints, Checkpoint};
pub use free_list::FreeList;
pub use map_table::MapTable;
pub use prf::PhysRegFile;

use crate::common::ConfigError;

/// Register-renaming and speculative-recovery unit.
///
/// Exclusively owns all renaming state; the surrounding pipeline interacts
/// through the accessors below, once or more per simulated cycle.
#[derive(Debug)]
pub struct Renamer {
    rmt: MapTable,
    amt: MapTable,
    free_list: FreeList,
    active_list: ActiveList,
    prf: PhysRegFile,
    checkpoints: BranchCheckpoints,
    stats: RenameStats,
}

impl Renamer {
    /// Builds a renamer sized from `config`.
    ///
    /// Initial state: RMT == AMT == identity, free list full with every
    /// physical register beyond the logical range, active list empty, branch
    /// mask zero, and exactly the identity-mapped physical registers ready.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn new(config: &RenamerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rmt: MapTable::identity(config.logical_regs),
            amt: MapTable::identity(config.logical_regs),
            free_list: FreeList::new(config.logical_regs, config.physical_regs),
            active_list: ActiveList::new(config.active_list_size),
            prf: PhysRegFile::new(config.logical_regs, config.physical_regs),
            checkpoints: BranchCheckpoints::new(config.branch_checkpoints),
            stats: RenameStats::default(),
        })
    }

    // --- stall queries (evaluate before any allocating operation) ---

    /// Returns true if fewer than `needed` physical registers are free.
    #[inline]
    pub fn stall_free_list(&self, needed: usize) -> bool {
        self.free_list.has_unavailable_registers(needed)
    }

    /// Returns true if fewer than `needed` active-list slots are free.
    #[inline]
    pub fn stall_dispatch(&self, needed: usize) -> bool {
        self.active_list.has_insufficient_space(needed)
    }

    /// Returns true if fewer than `needed` branch checkpoint slots are free.
    #[inline]
    pub fn stall_branch(&self, needed: usize) -> bool {
        self.checkpoints.has_no_checkpoint_slot(needed)
    }

    // --- rename ---

    /// Current physical backing of a source register (speculative map).
    #[inline]
    pub fn rename_source(&self, reg: LogReg) -> PhysReg {
        self.rmt.get(reg)
    }

    /// Allocates a fresh physical register for a destination, installs it in
    /// the speculative map, and clears its readiness.
    ///
    /// # Panics
    ///
    /// Panics if the free list is empty ([`stall_free_list`](Self::stall_free_list)
    /// was ignored).
    pub fn rename_destination(&mut self, reg: LogReg) -> PhysReg {
        let phys = self.free_list.allocate();
        self.rmt.set(reg, phys);
        self.prf.clear_ready(phys);
        self.stats.destinations_renamed += 1;
        trace!(logical = %reg, phys = %phys, "renamed destination");
        phys
    }

    // --- branch speculation ---

    /// Current global branch mask, to be attached to a dispatching branch's
    /// record by the driver.
    #[inline]
    pub fn branch_mask(&self) -> BranchMask {
        self.checkpoints.mask()
    }

    /// Takes a checkpoint for a dispatching branch and returns its tag.
    ///
    /// # Panics
    ///
    /// Panics if no checkpoint slot is free
    /// ([`stall_branch`](Self::stall_branch) was ignored).
    pub fn checkpoint(&mut self) -> BranchTag {
        let (head, phase) = self.free_list.head_state();
        let tag = self.checkpoints.create(&self.rmt, head, phase);
        self.stats.checkpoints_created += 1;
        trace!(branch = %tag, "checkpoint created");
        tag
    }

    /// Resolves the branch owning `tag`, located at active-list slot `index`.
    ///
    /// A correct prediction only releases the checkpoint slot. A
    /// misprediction restores the speculative map and branch mask from the
    /// snapshot, rewinds the free list to reclaim every register allocated
    /// after the branch, and squashes every younger active-list record.
    ///
    /// # Panics
    ///
    /// Panics if `tag` has no outstanding checkpoint or `index` is not in
    /// flight.
    pub fn resolve(&mut self, index: usize, tag: BranchTag, correct: bool) {
        self.stats.branches_resolved += 1;
        if correct {
            self.checkpoints.resolve_correct(tag);
            trace!(branch = %tag, "branch resolved correct");
        } else {
            let checkpoint = self.checkpoints.take_mispredicted(tag);
            self.rmt.copy_from(&checkpoint.rmt);
            self.free_list
                .restore_head(checkpoint.free_head, checkpoint.free_head_phase);
            self.active_list.truncate_after(index);
            self.stats.branch_mispredictions += 1;
            trace!(branch = %tag, slot = index, "branch mispredicted, state restored");
        }
    }

    // --- dispatch and in-flight status ---

    /// Enters an instruction into the active list; returns its slot index.
    ///
    /// # Panics
    ///
    /// Panics if the active list is full
    /// ([`stall_dispatch`](Self::stall_dispatch) was ignored).
    pub fn dispatch(&mut self, info: DispatchInfo) -> usize {
        let index = self.active_list.dispatch(info);
        self.stats.dispatches += 1;
        trace!(pc = info.pc, slot = index, "dispatched");
        index
    }

    /// Marks the instruction at `index` as having finished execution.
    pub fn set_complete(&mut self, index: usize) {
        self.active_list.mark_complete(index);
    }

    /// Flags an exception on the instruction at `index`.
    pub fn set_exception(&mut self, index: usize) {
        self.active_list.mark_exception(index);
    }

    /// Flags a load ordering violation on the instruction at `index`.
    pub fn set_load_violation(&mut self, index: usize) {
        self.active_list.mark_load_violation(index);
    }

    /// Flags a branch misprediction on the instruction at `index`.
    pub fn set_branch_misprediction(&mut self, index: usize) {
        self.active_list.mark_branch_mispredict(index);
    }

    /// Flags a value misprediction on the instruction at `index`.
    pub fn set_value_misprediction(&mut self, index: usize) {
        self.active_list.mark_value_mispredict(index);
    }

    /// Exception flag of the instruction at `index`.
    pub fn is_exception(&self, index: usize) -> bool {
        self.active_list.is_exception(index)
    }

    // --- commit ---

    /// Read-only view of the oldest in-flight record, or `None` when nothing
    /// is in flight. Commit arbitration decides from this view whether to
    /// retire, wait, or squash.
    #[inline]
    pub fn peek_head(&self) -> Option<&ActiveListEntry> {
        self.active_list.peek_head()
    }

    /// Slot index of the oldest in-flight instruction.
    #[inline]
    pub fn head_slot(&self) -> usize {
        self.active_list.head_index()
    }

    /// Retires the oldest in-flight instruction.
    ///
    /// If it renamed a destination, the architectural map adopts the new
    /// mapping and the previous one returns to the free list. Only call
    /// after [`peek_head`](Self::peek_head) confirmed completion and the
    /// absence of faults that require a squash instead.
    ///
    /// # Panics
    ///
    /// Panics if the active list is empty or the head instruction has not
    /// completed.
    pub fn retire_head(&mut self) -> ActiveListEntry {
        let entry = self.active_list.pop_head();
        assert!(entry.completed, "retired an incomplete instruction");
        if let Some(dest) = entry.dest {
            let previous = self.amt.get(dest.logical);
            self.free_list.release(previous);
            self.amt.set(dest.logical, dest.phys);
            trace!(logical = %dest.logical, phys = %dest.phys, freed = %previous, "retired");
        }
        self.stats.retirements += 1;
        entry
    }

    /// Committed physical backing of a logical register (architectural map).
    #[inline]
    pub fn committed_mapping(&self, reg: LogReg) -> PhysReg {
        self.amt.get(reg)
    }

    // --- pipeline-wide recovery ---

    /// Discards all speculative state unconditionally (squash).
    ///
    /// The architectural map overwrites the speculative map, the active list
    /// collapses to empty, every checkpoint is released, and the free list
    /// resets to full: every physical register not mapped by the
    /// architectural map becomes free again.
    pub fn flush(&mut self) {
        self.rmt.copy_from(&self.amt);
        self.active_list.clear();
        self.checkpoints.clear_all();
        self.free_list.reset_to_full();
        debug_assert!(
            self.free_list.iter_free().all(|reg| !self.amt.maps(reg)),
            "free pool overlaps the architectural map after squash"
        );
        self.stats.squashes += 1;
        trace!("pipeline squashed");
    }

    // --- physical register file ---

    /// Returns true if `reg` holds a produced value.
    #[inline]
    pub fn is_ready(&self, reg: PhysReg) -> bool {
        self.prf.is_ready(reg)
    }

    /// Marks `reg` ready (execute stage, result written).
    #[inline]
    pub fn set_ready(&mut self, reg: PhysReg) {
        self.prf.set_ready(reg);
    }

    /// Marks `reg` not ready.
    #[inline]
    pub fn clear_ready(&mut self, reg: PhysReg) {
        self.prf.clear_ready(reg);
    }

    /// Reads the value of `reg`.
    #[inline]
    pub fn read(&self, reg: PhysReg) -> u64 {
        self.prf.read(reg)
    }

    /// Writes the value of `reg`.
    #[inline]
    pub fn write(&mut self, reg: PhysReg, value: u64) {
        self.prf.write(reg, value);
    }

    // --- observability ---

    /// Counters accumulated since construction.
    #[inline]
    pub const fn stats(&self) -> &RenameStats {
        &self.stats
    }

    /// Number of physical registers currently free.
    #[inline]
    pub fn free_regs(&self) -> usize {
        self.free_list.free_regs()
    }

    /// Number of instructions currently in flight.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.active_list.len()
    }
}
