//! Free list: circular pool of unallocated physical registers.
//!
//! The list is a fixed circular buffer with a head index (next register to
//! hand out) and a tail index (next slot to refill at retirement), each
//! carrying a phase bit so that head == tail can mean either empty or full.
//! Occupancy is computed in O(1) from the indices and phases, never by
//! scanning.
//!
//! Two recovery paths restore the pool without walking in-flight state:
//! squash marks every slot free in one step, and misprediction recovery
//! rewinds the head to a checkpointed position. Both are sound because
//! destination registers are allocated at the head and retired in program
//! order, which keeps the buffer's full contents equal, as a set, to the
//! complement of the architectural map at all times.

use crate::common::PhysReg;

/// Circular pool of free physical register IDs with phase-bit occupancy.
#[derive(Debug)]
pub struct FreeList {
    /// Fixed slot array; capacity = physical regs − logical regs.
    entries: Box<[PhysReg]>,
    /// Next register to allocate.
    head: usize,
    /// Next slot to refill.
    tail: usize,
    /// Head phase bit; flips each time the head wraps.
    head_phase: bool,
    /// Tail phase bit; flips each time the tail wraps.
    tail_phase: bool,
}

impl FreeList {
    /// Creates a full free list holding every physical register not
    /// initially backing a logical register: IDs `logical_regs..physical_regs`.
    pub fn new(logical_regs: usize, physical_regs: usize) -> Self {
        Self {
            entries: (logical_regs..physical_regs).map(PhysReg).collect(),
            head: 0,
            tail: 0,
            head_phase: false,
            // Equal indices with opposite phases encode "full".
            tail_phase: true,
        }
    }

    /// Total slot count.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of free registers currently in the pool, in O(1).
    #[inline]
    pub fn free_regs(&self) -> usize {
        if self.head_phase == self.tail_phase {
            self.tail - self.head
        } else {
            self.capacity() - (self.head - self.tail)
        }
    }

    /// Returns true if fewer than `needed` registers are free — the stall
    /// signal a driver must consult before renaming destinations this cycle.
    #[inline]
    pub fn has_unavailable_registers(&self, needed: usize) -> bool {
        self.free_regs() < needed
    }

    /// Pops the register at the head.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty: the driver ignored
    /// [`has_unavailable_registers`](Self::has_unavailable_registers).
    pub fn allocate(&mut self) -> PhysReg {
        assert!(
            self.free_regs() > 0,
            "free list underflow: rename-destination without a stall check"
        );
        let reg = self.entries[self.head];
        self.head += 1;
        if self.head == self.capacity() {
            self.head = 0;
            self.head_phase = !self.head_phase;
        }
        reg
    }

    /// Pushes a retired mapping's previous physical register at the tail.
    /// Called only from commit.
    ///
    /// # Panics
    ///
    /// Panics if the list is already full, which would mean a register was
    /// freed twice.
    pub fn release(&mut self, reg: PhysReg) {
        assert!(
            self.free_regs() < self.capacity(),
            "free list overflow: {reg} released into a full pool"
        );
        self.entries[self.tail] = reg;
        self.tail += 1;
        if self.tail == self.capacity() {
            self.tail = 0;
            self.tail_phase = !self.tail_phase;
        }
    }

    /// Marks every slot free (squash). The slot contents are already exactly
    /// the complement of the architectural map, so no rewrite is needed.
    pub fn reset_to_full(&mut self) {
        self.head = self.tail;
        self.tail_phase = !self.head_phase;
    }

    /// Current head position and phase, snapshotted into branch checkpoints.
    #[inline]
    pub fn head_state(&self) -> (usize, bool) {
        (self.head, self.head_phase)
    }

    /// Rewinds the head to a checkpointed position, reclaiming every
    /// register allocated since the checkpoint was taken.
    pub fn restore_head(&mut self, head: usize, head_phase: bool) {
        self.head = head;
        self.head_phase = head_phase;
        debug_assert!(self.free_regs() <= self.capacity());
    }

    /// Registers currently in the pool, head to tail. Used by the squash
    /// path to cross-check the pool against the architectural map.
    pub fn iter_free(&self) -> impl Iterator<Item = PhysReg> + '_ {
        let capacity = self.capacity();
        (0..self.free_regs()).map(move |i| self.entries[(self.head + i) % capacity])
    }
}
