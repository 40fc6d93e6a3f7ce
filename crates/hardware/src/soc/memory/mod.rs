//! Main memory (DRAM).
//!
//! This module implements the single DRAM channel. It provides:
//! 1. **Buffer:** Word-addressed backing store with wrap-around addressing.
//! 2. **Controller:** The row/CAS/burst state machine that the bus arbiter drives.

/// Word-addressed backing store.
pub mod buffer;

/// DDR controller state machine.
pub mod controller;

pub use buffer::DramBuffer;
pub use controller::{DramController, DramOp, DramRequest, DramState, DramStats};
