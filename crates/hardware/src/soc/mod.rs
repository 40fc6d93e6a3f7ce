//! System-on-Chip (SoC) Components.
//!
//! This module organizes the memory side of the machine: both L1 caches, the
//! front-side bus arbiter, and the DRAM controller, assembled into a `System` that
//! can be clocked with or without a CPU attached.

/// Memory system assembly and its per-cycle driver.
pub mod builder;

/// Front-side bus arbiter.
pub mod interconnect;

/// DRAM buffer and controller.
pub mod memory;

/// Two-phase clocking trait.
pub mod traits;

pub use builder::System;
pub use interconnect::{Bus, BusSignals, Requester};
pub use traits::Clocked;
