//! Startup error definitions.
//!
//! The per-cycle model has no failure modes: stalls are signals, not errors. Everything
//! that can go wrong happens before cycle 0 while the machine is configured and its RAM
//! image is loaded. This module defines:
//! 1. **`SimError`:** Configuration, parse, and image-load failures.
//! 2. **`Result`:** The crate-wide result alias.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a machine or loading its RAM image.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file (RAM image or configuration) could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The RAM image is larger than the configured DRAM.
    #[error("image is {size} bytes but DRAM holds only {capacity} bytes")]
    ImageTooLarge {
        /// Image size in bytes.
        size: usize,
        /// DRAM capacity in bytes.
        capacity: usize,
    },

    /// A configuration file is not valid JSON for `Config`.
    #[error("invalid configuration file '{}': {source}", path.display())]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for fallible startup operations.
pub type Result<T> = std::result::Result<T, SimError>;
