//! Common utilities and types used throughout the machine model.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Address Fields:** Cache tag/index/offset and DRAM bank/row/column extraction.
//! 2. **Constants:** Cache geometry, DRAM timing, and instruction field layout.
//! 3. **Error Handling:** The startup error type raised before the first cycle.

/// Address field extraction for caches and DRAM.
pub mod addr;

/// Common constants used throughout the machine model.
pub mod constants;

/// Startup error type.
pub mod error;

pub use addr::{CacheAddr, DramAddr};
pub use error::{Result, SimError};
