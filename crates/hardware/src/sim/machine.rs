//! Cycle sequencing for the whole machine.
//!
//! `Machine` owns the core and the memory system side by side and advances them in
//! the fixed order that keeps the two-phase protocol intact:
//! 1. **Core, combinational:** Stages read committed latches and drive cache requests.
//! 2. **Memory side, update:** Instruction cache, data cache, then DRAM.
//! 3. **Memory side, commit:** All ports become visible, then the bus routes them.
//! 4. **Core, sequential:** Latches advance or hold on the committed cache outputs.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::common::Result;
use crate::config::Config;
use crate::core::Cpu;
use crate::sim::loader;
use crate::sim::trace::Snapshot;
use crate::soc::System;
use crate::stats::SimStats;

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The cycle limit was reached.
    CycleLimit,
    /// The fetch PC reached the kill address.
    KillAddress,
}

/// Core plus memory system.
#[derive(Debug)]
pub struct Machine {
    /// The five-stage core.
    pub cpu: Cpu,
    /// Caches, bus, and DRAM.
    pub system: System,
    start_time: Instant,
}

impl Machine {
    /// Builds a machine from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Machine configuration; validated here.
    ///
    /// # Errors
    ///
    /// `SimError::InvalidConfig` if the configuration is out of range.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            ram_words = config.memory.ram_words,
            fill = ?config.memory.fill,
            queue_depth = config.cache.write_queue_depth,
            start_pc = config.general.start_pc,
            "building machine"
        );
        Ok(Self {
            cpu: Cpu::new(config.general.start_pc),
            system: System::new(config),
            start_time: Instant::now(),
        })
    }

    /// Loads a flat binary RAM image at address 0.
    ///
    /// # Errors
    ///
    /// `SimError::Io` or `SimError::ImageTooLarge`.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        loader::load_image(path, self.system.dram.buffer_mut())
    }

    /// Loads a program given as instruction words at address 0.
    ///
    /// # Errors
    ///
    /// `SimError::ImageTooLarge` if the program does not fit.
    pub fn load_words(&mut self, words: &[u32]) -> Result<()> {
        loader::load_words(words, self.system.dram.buffer_mut())
    }

    /// Advances the machine by one clock cycle.
    ///
    /// # Returns
    ///
    /// The fetch PC after the cycle.
    pub fn cycle(&mut self) -> u32 {
        self.cpu
            .update_combinational(&mut self.system.icache, &mut self.system.dcache);
        self.system.update();
        self.system.commit();
        self.cpu
            .update_sequential(self.system.icache.ports(), self.system.dcache.ports());
        self.cpu.pc
    }

    /// Number of cycles run so far.
    pub const fn cycles(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Runs until a stop condition holds.
    ///
    /// Without either condition the run never ends.
    ///
    /// # Arguments
    ///
    /// * `limit` - Total cycle count at which to stop.
    /// * `kill` - Stop once the fetch PC equals this address after a cycle.
    pub fn run_until(&mut self, limit: Option<u64>, kill: Option<u32>) -> StopReason {
        self.run_with(limit, kill, |_| {})
    }

    /// Runs until a stop condition holds, calling `after_cycle` after every cycle.
    pub fn run_with<F>(&mut self, limit: Option<u64>, kill: Option<u32>, mut after_cycle: F) -> StopReason
    where
        F: FnMut(&Self),
    {
        loop {
            if limit.is_some_and(|l| self.cycles() >= l) {
                tracing::info!(cycles = self.cycles(), "cycle limit reached");
                return StopReason::CycleLimit;
            }
            let pc = self.cycle();
            after_cycle(&*self);
            if kill == Some(pc) {
                tracing::info!(cycles = self.cycles(), pc, "kill address reached");
                return StopReason::KillAddress;
            }
        }
    }

    /// Captures the state at the end of the last cycle.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.cpu, &self.system)
    }

    /// Collects the counters of every component.
    pub fn stats(&self) -> SimStats {
        SimStats::new(
            self.start_time,
            self.cpu.stats,
            self.system.icache.stats,
            self.system.dcache.stats,
            self.system.bus.stats,
            self.system.dram.stats,
        )
    }
}
