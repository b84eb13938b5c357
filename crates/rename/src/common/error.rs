//! Configuration error definitions.
//!
//! Renaming itself has no recoverable runtime errors: a driver that ignores a
//! stall signal has a programming bug, and the components assert rather than
//! corrupt state. What *can* fail recoverably is constructing a renamer from
//! an invalid configuration, and those failures are reported here.

use thiserror::Error;

/// Rejected renamer configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Renaming needs surplus physical registers to draw from; the free list
    /// capacity is `physical_regs - logical_regs`.
    #[error("physical register count ({physical}) must exceed logical register count ({logical})")]
    NoSurplusRegisters {
        /// Configured logical register count.
        logical: usize,
        /// Configured physical register count.
        physical: usize,
    },

    /// The global branch mask is a fixed-width bit vector and cannot track
    /// more outstanding branches than it has bits.
    #[error("branch checkpoint count ({requested}) exceeds the mask width ({max})")]
    TooManyCheckpoints {
        /// Configured checkpoint count.
        requested: usize,
        /// Widest supported mask.
        max: usize,
    },

    /// A zero-sized structure can never accept a dispatch or rename.
    #[error("{field} must be non-zero")]
    ZeroCapacity {
        /// Name of the offending configuration field.
        field: &'static str,
    },

    /// Malformed JSON passed to [`RenamerConfig::from_json`](crate::config::RenamerConfig::from_json).
    #[error("malformed configuration: {0}")]
    Malformed(String),
}
