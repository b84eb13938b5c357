//! Common types shared by every renamer component.
//!
//! This module provides the building blocks used throughout the crate:
//! 1. **Register Types:** Strong index types for logical and physical registers.
//! 2. **Branch Tracking:** Branch tags and the global branch mask bit vector.
//! 3. **Error Handling:** Configuration validation errors.

/// Configuration error types.
pub mod error;

/// Register index and branch mask types.
pub mod reg;

pub use error::ConfigError;
pub use reg::{BranchMask, BranchTag, LogReg, PhysReg};
