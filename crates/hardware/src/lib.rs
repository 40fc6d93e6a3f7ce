//! Cycle-accurate RV32I machine model.
//!
//! This crate models a small RISC-V machine at the level of its clocked components:
//! 1. **Core:** Five-stage in-order pipeline (fetch, decode, execute, memory, writeback)
//!    with stall-on-hazard and branch resolution in Execute.
//! 2. **Caches:** Two-way instruction and data caches; the data cache writes back
//!    through a bounded queue.
//! 3. **Interconnect:** A fixed-priority bus arbiter in front of a single DRAM channel.
//! 4. **DRAM:** One open row, CAS latency, and eight-word bursts.
//! 5. **Simulation:** Configuration, RAM image loading, tracing, and statistics.
//!
//! Every component advances in two phases per cycle (compute, then commit), so no
//! component observes another's outputs from the same cycle.

/// Common types and constants (address splitting, geometry, errors).
pub mod common;
/// Machine configuration (defaults, enums, validation).
pub mod config;
/// CPU core (pipeline, register file, execution units, caches).
pub mod core;
/// Instruction set (RV32I opcodes, fields, decoder).
pub mod isa;
/// Cycle driver, RAM image loader, and trace snapshots.
pub mod sim;
/// Memory system (bus arbiter, DRAM controller, clocking contract).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Startup error type.
pub use crate::common::SimError;
/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// The five-stage core.
pub use crate::core::Cpu;
/// Core plus memory system; the usual entry point.
pub use crate::sim::Machine;
/// Caches, bus, and DRAM; can be clocked without a core.
pub use crate::soc::System;
