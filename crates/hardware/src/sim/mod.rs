//! Simulation driver support.
//!
//! Provides the `Machine` that sequences the core and memory system through one
//! cycle, the RAM image loader, and per-cycle trace snapshots.

/// RAM image loading.
pub mod loader;

/// Cycle sequencing of core and memory system.
pub mod machine;

/// Per-cycle state snapshots for text and JSON traces.
pub mod trace;

pub use machine::{Machine, StopReason};
pub use trace::Snapshot;
