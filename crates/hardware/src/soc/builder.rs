//! Memory system construction and top-level `System` type.
//!
//! This module builds the memory side of the machine from configuration. It performs:
//! 1. **Cache setup:** Creates the instruction cache and the data cache with its
//!    configured write-back queue depth.
//! 2. **Memory setup:** Creates the DRAM controller over a filled buffer.
//! 3. **Clocking:** `tick` runs one memory-side cycle in the fixed order
//!    caches, DRAM, port commit, bus arbiter.
//!
//! The CPU drives `icache.request` and `dcache.request` before `tick`; tests drive them
//! directly to exercise the memory side in isolation.

use crate::config::Config;
use crate::core::units::cache::{DCache, ICache};
use crate::soc::interconnect::Bus;
use crate::soc::memory::controller::DramController;
use crate::soc::traits::Clocked;

/// Caches, bus, and DRAM.
#[derive(Debug)]
pub struct System {
    /// Instruction cache.
    pub icache: ICache,
    /// Data cache.
    pub dcache: DCache,
    /// Front-side bus arbiter.
    pub bus: Bus,
    /// DRAM controller.
    pub dram: DramController,
}

impl System {
    /// Builds the memory system from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration.
    ///
    /// # Returns
    ///
    /// A system with empty caches, an idle bus, and DRAM holding the fill pattern.
    pub fn new(config: &Config) -> Self {
        Self {
            icache: ICache::new(),
            dcache: DCache::new(config.cache.write_queue_depth),
            bus: Bus::new(),
            dram: DramController::new(&config.memory),
        }
    }

    /// Runs the compute phase of every memory-side component.
    pub fn update(&mut self) {
        self.icache.update();
        self.dcache.update();
        self.dram.update();
    }

    /// Commits every component's ports, then lets the arbiter route them.
    pub fn commit(&mut self) {
        self.icache.commit();
        self.dcache.commit();
        self.dram.commit();
        self.bus.update(&mut self.icache, &mut self.dcache, &mut self.dram);
    }

    /// Runs one full memory-side cycle.
    pub fn tick(&mut self) {
        self.update();
        self.commit();
    }

    /// Returns `true` when both caches can serve their current request.
    pub const fn ready(&self) -> bool {
        self.icache.ports().valid && self.dcache.ports().valid
    }
}
