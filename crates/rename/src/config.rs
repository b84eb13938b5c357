//! Configuration for the renaming unit.
//!
//! This module defines the structural parameters of the renamer. It provides:
//! 1. **Defaults:** Baseline machine constants (register counts, window sizes).
//! 2. **Structure:** A single flat config covering all five components.
//! 3. **Validation:** Construction-time checks rejecting impossible machines.
//!
//! Configuration is supplied via JSON from a driver harness ([`RenamerConfig::from_json`])
//! or use `RenamerConfig::default()` for a baseline machine.

use serde::Deserialize;

use crate::common::{BranchMask, ConfigError};

/// Default configuration constants for the renamer.
///
/// These values define the baseline machine when a field is not explicitly
/// overridden in the supplied JSON.
mod defaults {
    /// Number of logical (architectural) registers.
    ///
    /// Covers a combined integer + floating-point architectural namespace.
    pub const LOGICAL_REGS: usize = 64;

    /// Number of physical registers.
    ///
    /// The surplus over [`LOGICAL_REGS`] is the free-list capacity; renaming
    /// stalls once all surplus registers back in-flight destinations.
    pub const PHYSICAL_REGS: usize = 160;

    /// Maximum outstanding (unresolved) branches.
    ///
    /// One checkpoint slot and one global-branch-mask bit exist per branch.
    pub const BRANCH_CHECKPOINTS: usize = 16;

    /// Active list capacity (maximum in-flight instructions).
    pub const ACTIVE_LIST_SIZE: usize = 256;
}

/// Structural parameters of the renaming unit.
///
/// All four values are fixed for the unit's lifetime; every internal
/// structure is sized from them once at construction and never resized.
#[derive(Debug, Clone, Deserialize)]
pub struct RenamerConfig {
    /// Number of logical (architectural) registers.
    #[serde(default = "RenamerConfig::default_logical_regs")]
    pub logical_regs: usize,

    /// Number of physical registers; must exceed `logical_regs`.
    #[serde(default = "RenamerConfig::default_physical_regs")]
    pub physical_regs: usize,

    /// Maximum outstanding branches (checkpoint slots / mask width).
    #[serde(default = "RenamerConfig::default_branch_checkpoints")]
    pub branch_checkpoints: usize,

    /// Active list capacity (maximum in-flight instructions).
    #[serde(default = "RenamerConfig::default_active_list_size")]
    pub active_list_size: usize,
}

impl RenamerConfig {
    fn default_logical_regs() -> usize {
        defaults::LOGICAL_REGS
    }

    fn default_physical_regs() -> usize {
        defaults::PHYSICAL_REGS
    }

    fn default_branch_checkpoints() -> usize {
        defaults::BRANCH_CHECKPOINTS
    }

    fn default_active_list_size() -> usize {
        defaults::ACTIVE_LIST_SIZE
    }

    /// Parses a configuration from JSON, applying defaults for absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] for invalid JSON and the relevant
    /// validation error for a structurally impossible machine.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a buildable machine.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any capacity is zero, the physical
    /// register count does not exceed the logical count, or the checkpoint
    /// count exceeds the branch-mask width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logical_regs == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "logical_regs",
            });
        }
        if self.active_list_size == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "active_list_size",
            });
        }
        if self.branch_checkpoints == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "branch_checkpoints",
            });
        }
        if self.physical_regs <= self.logical_regs {
            return Err(ConfigError::NoSurplusRegisters {
                logical: self.logical_regs,
                physical: self.physical_regs,
            });
        }
        if self.branch_checkpoints > BranchMask::MAX_WIDTH {
            return Err(ConfigError::TooManyCheckpoints {
                requested: self.branch_checkpoints,
                max: BranchMask::MAX_WIDTH,
            });
        }
        Ok(())
    }

    /// Free-list capacity implied by the register counts.
    #[inline]
    pub const fn free_list_capacity(&self) -> usize {
        self.physical_regs - self.logical_regs
    }
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            logical_regs: defaults::LOGICAL_REGS,
            physical_regs: defaults::PHYSICAL_REGS,
            branch_checkpoints: defaults::BRANCH_CHECKPOINTS,
            active_list_size: defaults::ACTIVE_LIST_SIZE,
        }
    }
}
