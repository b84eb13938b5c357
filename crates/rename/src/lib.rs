//! Register-renaming and speculative-recovery unit for an out-of-order
//! pipeline simulator.
//!
//! This crate implements the renaming core a cycle-stepped pipeline driver
//! calls into once or more per simulated cycle:
//! 1. **Map Tables:** Speculative and architectural logical→physical register maps.
//! 2. **Free List:** Circular pool of unallocated physical registers with O(1) occupancy.
//! 3. **Active List:** In-order in-flight instruction records for in-order commit.
//! 4. **Physical Register File:** Values and per-register readiness flags.
//! 5. **Branch Checkpoints:** Global branch mask plus snapshot/restore recovery.
//!
//! The unit is single-threaded and purely bookkeeping: it records renames,
//! dispatches, completions, and faults, and restores consistent state on
//! branch misprediction or full squash. Instruction fetch, execution,
//! scheduling, and the cycle loop are external collaborators that interact
//! through [`Renamer`]'s accessors.

/// Common types (register indices, branch masks, errors).
pub mod common;
/// Renamer configuration (defaults, validation, JSON intake).
pub mod config;
/// The five renaming components and the [`Renamer`] facade.
pub mod rename;
/// Renaming statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `RenamerConfig::default()` or deserialize from JSON.
pub use crate::config::RenamerConfig;
/// Main unit type; holds all renaming state, owned by the pipeline driver.
pub use crate::rename::Renamer;
