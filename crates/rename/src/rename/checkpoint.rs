//! Branch speculation tracker: global branch mask and checkpoint slots.
//!
//! Every dispatched branch claims one bit of the global branch mask (GBM)
//! and one checkpoint slot. The slot snapshots everything needed to put the
//! renamer back exactly as it stood just before the branch:
//! 1. **Speculative map:** A full copy of the RMT.
//! 2. **Branch mask:** The GBM as of before the branch's own bit was set, so
//!    a restore drops the branch itself and every younger branch in one move.
//! 3. **Free-list head:** Position and phase, so rewinding the head reclaims
//!    every physical register allocated after the checkpoint in O(1).
//!
//! A correctly predicted branch releases its slot without restoring
//! anything, but its bit must also be scrubbed from every younger
//! checkpoint's saved mask: those snapshots were taken while the bit was
//! set, and restoring one later must not resurrect a branch that already
//! resolved.

use crate::common::{BranchMask, BranchTag};
use crate::rename::map_table::MapTable;

/// Renaming state snapshotted when a branch is dispatched.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// Speculative map as of just before the branch.
    pub rmt: MapTable,
    /// GBM as of just before the branch's own bit was set.
    pub mask: BranchMask,
    /// Free-list head index at checkpoint time.
    pub free_head: usize,
    /// Free-list head phase at checkpoint time.
    pub free_head_phase: bool,
}

/// Global branch mask plus one checkpoint slot per possible outstanding branch.
#[derive(Debug)]
pub struct BranchCheckpoints {
    /// Set bit = unresolved branch holding the matching slot.
    mask: BranchMask,
    /// Configured maximum outstanding branches (mask width).
    width: usize,
    /// Slot storage; occupied exactly where `mask` has a set bit.
    slots: Box<[Option<Checkpoint>]>,
}

impl BranchCheckpoints {
    /// Creates an empty tracker supporting `width` outstanding branches.
    pub fn new(width: usize) -> Self {
        Self {
            mask: BranchMask::default(),
            width,
            slots: vec![None; width].into_boxed_slice(),
        }
    }

    /// Current global branch mask. The driver attaches this to each
    /// dispatched instruction so later recovery knows which branches it
    /// depends on.
    #[inline]
    pub const fn mask(&self) -> BranchMask {
        self.mask
    }

    /// Returns true if fewer than `needed` checkpoint slots are unclaimed —
    /// the stall signal a driver must consult before dispatching branches
    /// this cycle.
    #[inline]
    pub fn has_no_checkpoint_slot(&self, needed: usize) -> bool {
        self.width - self.mask.len() < needed
    }

    /// Claims the lowest clear bit and fills its slot with a snapshot of the
    /// speculative map and free-list head. Returns the branch's tag.
    ///
    /// # Panics
    ///
    /// Panics if every slot is claimed: the driver ignored
    /// [`has_no_checkpoint_slot`](Self::has_no_checkpoint_slot).
    pub fn create(
        &mut self,
        rmt: &MapTable,
        free_head: usize,
        free_head_phase: bool,
    ) -> BranchTag {
        let Some(tag) = self.mask.lowest_clear(self.width) else {
            panic!("checkpoint overflow: branch dispatch without a stall check");
        };
        self.slots[tag.0] = Some(Checkpoint {
            rmt: rmt.clone(),
            // Saved before insertion: restoring it clears this branch's own
            // bit along with every younger branch's.
            mask: self.mask,
            free_head,
            free_head_phase,
        });
        self.mask.insert(tag);
        tag
    }

    /// Releases `tag`'s slot after a correct prediction. No state is
    /// restored; the bit is cleared from the live mask and from every
    /// still-valid checkpoint's saved mask.
    ///
    /// # Panics
    ///
    /// Panics if `tag` has no outstanding checkpoint.
    pub fn resolve_correct(&mut self, tag: BranchTag) {
        assert!(
            self.mask.contains(tag),
            "resolve of branch {tag} with no outstanding checkpoint"
        );
        self.mask.remove(tag);
        self.slots[tag.0] = None;
        for slot in self.slots.iter_mut().flatten() {
            slot.mask.remove(tag);
        }
    }

    /// Removes and returns `tag`'s checkpoint after a misprediction, and
    /// rolls the mask back to the snapshot (discarding every branch younger
    /// than `tag`, whose wrong-path checkpoints are dropped).
    ///
    /// # Panics
    ///
    /// Panics if `tag` has no outstanding checkpoint.
    pub fn take_mispredicted(&mut self, tag: BranchTag) -> Checkpoint {
        assert!(
            self.mask.contains(tag),
            "resolve of branch {tag} with no outstanding checkpoint"
        );
        let Some(checkpoint) = self.slots[tag.0].take() else {
            panic!("branch {tag} set in mask but slot empty");
        };
        self.mask = checkpoint.mask;
        for (bit, slot) in self.slots.iter_mut().enumerate() {
            if !self.mask.contains(BranchTag(bit)) {
                *slot = None;
            }
        }
        checkpoint
    }

    /// Releases every checkpoint and zeroes the mask (squash).
    pub fn clear_all(&mut self) {
        self.mask = BranchMask::default();
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}
