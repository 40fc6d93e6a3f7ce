//! Execution units and functional components.
//!
//! This module contains the stateless leaves consumed by the pipeline (ALU, branch
//! unit, load/store lane logic) and the two L1 caches that sit between the
//! pipeline and the front-side bus.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit: condition evaluation for branches and jumps.
pub mod bru;

/// Split L1 instruction and data caches with the write-back queue.
pub mod cache;

/// Load/Store Unit: byte-lane steering for stores and extraction for loads.
pub mod lsu;
