//! Active list: in-order queue of in-flight instruction records.
//!
//! The active list is the backbone for in-order commit. It is a circular
//! buffer with head (oldest not-yet-committed instruction) and tail (next
//! dispatch slot), each index carrying a phase bit to distinguish empty from
//! full at head == tail. It provides:
//! 1. **Dispatch:** Appends a record at the tail and returns its slot index.
//! 2. **Completion/Faults:** Direct indexed flag writes by the execute stage.
//! 3. **Commit Observation:** A read-only view of the head record.
//! 4. **Squash:** Collapse to empty, or truncate after a mispredicted branch.
//!
//! The architectural side effects of retiring the head (map-table update,
//! free-list release) belong to the owning [`Renamer`](super::Renamer); the
//! list itself only tracks occupancy and per-record status.

use crate::common::{LogReg, PhysReg};

/// Instruction-class flags recorded at dispatch.
///
/// Behavioral differences between the classes live in the external
/// execute/commit logic; the renamer only stores the flags for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstClass {
    /// Load instruction.
    pub is_load: bool,
    /// Store instruction.
    pub is_store: bool,
    /// Branch or jump instruction.
    pub is_branch: bool,
    /// Atomic memory operation.
    pub is_atomic: bool,
    /// CSR (system register) instruction.
    pub is_csr: bool,
}

/// Destination rename of an instruction that writes a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DestMapping {
    /// Logical register written.
    pub logical: LogReg,
    /// Physical register newly allocated to back it.
    pub phys: PhysReg,
}

/// Dispatch payload supplied by the driver for one instruction.
#[derive(Clone, Copy, Debug)]
pub struct DispatchInfo {
    /// Destination rename, or `None` for instructions without a register
    /// result (stores, branches, fences).
    pub dest: Option<DestMapping>,
    /// Instruction-class flags.
    pub class: InstClass,
    /// Program counter.
    pub pc: u64,
}

/// One in-flight instruction record.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActiveListEntry {
    /// Occupied slot.
    pub valid: bool,
    /// Destination rename, if the instruction writes a register.
    pub dest: Option<DestMapping>,
    /// Execution finished; result (if any) is in the physical register file.
    pub completed: bool,
    /// Exception raised during execution.
    pub exception: bool,
    /// Load ordering violation detected.
    pub load_violation: bool,
    /// Branch direction or target mispredicted.
    pub branch_mispredict: bool,
    /// Predicted value turned out wrong.
    pub value_mispredict: bool,
    /// Instruction-class flags from dispatch.
    pub class: InstClass,
    /// Program counter.
    pub pc: u64,
}

/// Circular in-flight instruction queue with phase-bit occupancy.
#[derive(Debug)]
pub struct ActiveList {
    entries: Box<[ActiveListEntry]>,
    /// Oldest not-yet-committed instruction.
    head: usize,
    /// Next dispatch slot.
    tail: usize,
    head_phase: bool,
    tail_phase: bool,
}

impl ActiveList {
    /// Creates an empty active list with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![ActiveListEntry::default(); capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            head_phase: false,
            tail_phase: false,
        }
    }

    /// Total slot count (maximum in-flight instructions).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of in-flight instructions, in O(1).
    #[inline]
    pub fn len(&self) -> usize {
        if self.head_phase == self.tail_phase {
            self.tail - self.head
        } else {
            self.capacity() - (self.head - self.tail)
        }
    }

    /// Returns true if nothing is in flight.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if fewer than `needed` slots remain — the stall signal a
    /// driver must consult before dispatching a bundle this cycle.
    #[inline]
    pub fn has_insufficient_space(&self, needed: usize) -> bool {
        self.capacity() - self.len() < needed
    }

    /// Slot index of the oldest in-flight instruction.
    #[inline]
    pub fn head_index(&self) -> usize {
        self.head
    }

    /// Appends a record at the tail; all status flags start cleared. Returns
    /// the slot index so the execute stage can address the record directly.
    ///
    /// # Panics
    ///
    /// Panics if the list is full: the driver ignored
    /// [`has_insufficient_space`](Self::has_insufficient_space).
    pub fn dispatch(&mut self, info: DispatchInfo) -> usize {
        assert!(
            !self.has_insufficient_space(1),
            "active list overflow: dispatch without a stall check"
        );
        let index = self.tail;
        self.entries[index] = ActiveListEntry {
            valid: true,
            dest: info.dest,
            class: info.class,
            pc: info.pc,
            ..ActiveListEntry::default()
        };
        self.tail += 1;
        if self.tail == self.capacity() {
            self.tail = 0;
            self.tail_phase = !self.tail_phase;
        }
        index
    }

    /// Marks the instruction at `index` as having finished execution.
    pub fn mark_complete(&mut self, index: usize) {
        self.in_flight_mut(index).completed = true;
    }

    /// Flags an exception on the instruction at `index`.
    pub fn mark_exception(&mut self, index: usize) {
        self.in_flight_mut(index).exception = true;
    }

    /// Flags a load ordering violation on the instruction at `index`.
    pub fn mark_load_violation(&mut self, index: usize) {
        self.in_flight_mut(index).load_violation = true;
    }

    /// Flags a branch misprediction on the instruction at `index`.
    pub fn mark_branch_mispredict(&mut self, index: usize) {
        self.in_flight_mut(index).branch_mispredict = true;
    }

    /// Flags a value misprediction on the instruction at `index`.
    pub fn mark_value_mispredict(&mut self, index: usize) {
        self.in_flight_mut(index).value_mispredict = true;
    }

    /// Exception flag of the instruction at `index`.
    pub fn is_exception(&self, index: usize) -> bool {
        assert!(
            self.is_in_flight(index),
            "active list slot {index} is not in flight"
        );
        self.entries[index].exception
    }

    /// Read-only view of the oldest record, or `None` when the list is
    /// empty. The only way commit arbitration observes active-list state.
    pub fn peek_head(&self) -> Option<&ActiveListEntry> {
        if self.is_empty() {
            None
        } else {
            Some(&self.entries[self.head])
        }
    }

    /// Removes and returns the oldest record, advancing the head.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn pop_head(&mut self) -> ActiveListEntry {
        assert!(!self.is_empty(), "retire from an empty active list");
        let entry = self.entries[self.head];
        self.entries[self.head].valid = false;
        self.head += 1;
        if self.head == self.capacity() {
            self.head = 0;
            self.head_phase = !self.head_phase;
        }
        entry
    }

    /// Collapses the list to empty (squash).
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.valid = false;
        }
        self.tail = self.head;
        self.tail_phase = self.head_phase;
    }

    /// Squashes every record younger than `index`, keeping `index` itself
    /// (selective branch-misprediction recovery).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in flight.
    pub fn truncate_after(&mut self, index: usize) {
        assert!(
            self.is_in_flight(index),
            "active list slot {index} is not in flight"
        );
        let mut cursor = (index + 1) % self.capacity();
        while cursor != self.tail {
            self.entries[cursor].valid = false;
            cursor = (cursor + 1) % self.capacity();
        }
        self.tail = (index + 1) % self.capacity();
        // If the surviving region wraps (or fills the buffer exactly), the
        // tail sits at or before the head in the opposite phase.
        self.tail_phase = if self.tail > self.head {
            self.head_phase
        } else {
            !self.head_phase
        };
    }

    /// Returns true if `index` lies between the head and tail (circularly):
    /// a dispatched-but-not-committed instruction.
    pub fn is_in_flight(&self, index: usize) -> bool {
        if index >= self.capacity() || self.is_empty() {
            return false;
        }
        if self.head_phase == self.tail_phase {
            self.head <= index && index < self.tail
        } else {
            index >= self.head || index < self.tail
        }
    }

    fn in_flight_mut(&mut self, index: usize) -> &mut ActiveListEntry {
        assert!(
            self.is_in_flight(index),
            "active list slot {index} is not in flight"
        );
        &mut self.entries[index]
    }
}
