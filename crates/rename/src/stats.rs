//! Renaming statistics collection and reporting.
//!
//! This module tracks bookkeeping counters for the renaming unit. It provides:
//! 1. **Throughput:** Destination renames, dispatches, and retirements.
//! 2. **Speculation:** Checkpoints created, branches resolved, mispredictions.
//! 3. **Recovery:** Full-pipeline squashes.

/// Counters accumulated by a [`Renamer`](crate::rename::Renamer) since construction.
#[derive(Clone, Debug, Default)]
pub struct RenameStats {
    /// Destination registers renamed (free-list allocations).
    pub destinations_renamed: u64,
    /// Instructions entered into the active list.
    pub dispatches: u64,
    /// Instructions retired from the active-list head.
    pub retirements: u64,
    /// Branch checkpoints created.
    pub checkpoints_created: u64,
    /// Branches resolved, correct or not.
    pub branches_resolved: u64,
    /// Branches resolved as mispredicted (checkpoint restores).
    pub branch_mispredictions: u64,
    /// Full-pipeline squashes.
    pub squashes: u64,
}

impl RenameStats {
    /// Prints a formatted report to stdout.
    pub fn print(&self) {
        println!("\n[Renaming]");
        println!("  Destinations Renamed: {}", self.destinations_renamed);
        println!("  Dispatches:           {}", self.dispatches);
        println!("  Retirements:          {}", self.retirements);

        println!("\n[Speculation]");
        println!("  Checkpoints Created:  {}", self.checkpoints_created);
        println!("  Branches Resolved:    {}", self.branches_resolved);
        if self.branches_resolved > 0 {
            println!(
                "  Mispredictions:       {:<10} ({:.2}%)",
                self.branch_mispredictions,
                (self.branch_mispredictions as f64 / self.branches_resolved as f64) * 100.0
            );
        } else {
            println!("  Mispredictions:       {}", self.branch_mispredictions);
        }
        println!("  Squashes:             {}", self.squashes);
    }
}
