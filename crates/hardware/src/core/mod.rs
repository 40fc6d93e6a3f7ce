//! Core processor implementation.
//!
//! This module contains the five-stage RV32I core: the register file, the pipeline
//! latches and stages, and the execution units including both L1 caches.

/// Architectural state (integer register file).
pub mod arch;

/// CPU core and its two cycle phases.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch unit, LSU, caches).
pub mod units;

pub use self::cpu::Cpu;
