//! Simulation statistics collection and reporting.
//!
//! This module gathers the counters kept by each component into one report. It provides:
//! 1. **Pipeline:** Cycles, retired instructions, and stall cycles by cause.
//! 2. **Caches:** Hits, misses, eviction waits, and write-back activity for L1-I and L1-D.
//! 3. **Bus:** Grants per requester and busy cycles.
//! 4. **DRAM:** Row buffer hits and misses, burst reads and writes.
//!
//! Every counter is advanced by the component that owns it; `SimStats` is a snapshot.

use std::time::Instant;

use serde::Serialize;

use crate::core::units::cache::CacheStats;
use crate::soc::interconnect::BusStats;
use crate::soc::memory::controller::DramStats;

/// Counters advanced by the pipeline's sequential phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Instructions that entered Write-back (bubbles and squashed entries excluded).
    pub instructions_retired: u64,
    /// Cycles stalled because a cache was not ready.
    pub stalls_mem: u64,
    /// Cycles stalled on a read-after-write hazard.
    pub stalls_data: u64,
    /// Cycles fetch was blocked after a taken branch.
    pub stalls_control: u64,
    /// Taken branches and jumps.
    pub branches_taken: u64,
}

/// Statistics for a whole run.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Pipeline counters.
    pub pipeline: PipelineStats,
    /// Instruction cache counters.
    pub icache: CacheStats,
    /// Data cache counters.
    pub dcache: CacheStats,
    /// Bus arbiter counters.
    pub bus: BusStats,
    /// DRAM controller counters.
    pub dram: DramStats,
}

impl SimStats {
    /// Collects counters from every component.
    ///
    /// # Arguments
    ///
    /// * `start_time` - When the run began; used for host-speed figures.
    pub const fn new(
        start_time: Instant,
        pipeline: PipelineStats,
        icache: CacheStats,
        dcache: CacheStats,
        bus: BusStats,
        dram: DramStats,
    ) -> Self {
        Self {
            start_time,
            pipeline,
            icache,
            dcache,
            bus,
            dram,
        }
    }

    /// Instructions retired per cycle.
    pub fn ipc(&self) -> f64 {
        let cyc = self.pipeline.cycles.max(1);
        self.pipeline.instructions_retired as f64 / cyc as f64
    }

    /// Prints a summary to stdout.
    pub fn print(&self) {
        let p = &self.pipeline;
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = p.cycles.max(1) as f64;
        let instr = p.instructions_retired.max(1) as f64;
        let khz = if seconds > 0.0 {
            (p.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };
        let pct = |n: u64| (n as f64 / cyc) * 100.0;

        println!("\n==========================================================");
        println!("RV32I MACHINE STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", p.cycles);
        println!("sim_freq                 {khz:.2} kHz");
        println!("sim_insts                {}", p.instructions_retired);
        println!("sim_ipc                  {:.4}", self.ipc());
        println!("sim_cpi                  {:.4}", cyc / instr);
        println!("----------------------------------------------------------");
        println!("PIPELINE");
        println!("  stalls.memory          {} ({:.2}%)", p.stalls_mem, pct(p.stalls_mem));
        println!("  stalls.data            {} ({:.2}%)", p.stalls_data, pct(p.stalls_data));
        println!("  stalls.control         {} ({:.2}%)", p.stalls_control, pct(p.stalls_control));
        println!("  branches.taken         {}", p.branches_taken);
        println!("----------------------------------------------------------");

        let print_cache = |name: &str, s: &CacheStats| {
            let total = s.hits + s.misses;
            let miss_rate = if total > 0 {
                (s.misses as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            println!(
                "  {:<6} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                name, total, s.hits, miss_rate
            );
        };
        println!("MEMORY HIERARCHY");
        print_cache("L1-I", &self.icache);
        print_cache("L1-D", &self.dcache);
        println!("  l1d.eviction_waits     {}", self.dcache.eviction_waits);
        println!("  l1d.write_backs        {}", self.dcache.write_backs);
        println!("  l1d.queue_overflows    {}", self.dcache.write_queue_overflows);
        println!("  l1d.wb_conflicts       {}", self.dcache.write_back_conflicts);
        println!("----------------------------------------------------------");
        println!("BUS");
        println!("  grants.icache_read     {}", self.bus.icache_reads);
        println!("  grants.dcache_read     {}", self.bus.dcache_reads);
        println!("  grants.dcache_write    {}", self.bus.dcache_writes);
        println!("  grants.urgent_write    {}", self.bus.urgent_writes);
        println!("  busy_cycles            {} ({:.2}%)", self.bus.busy_cycles, pct(self.bus.busy_cycles));
        println!("----------------------------------------------------------");
        println!("DRAM");
        println!("  bursts.read            {}", self.dram.reads);
        println!("  bursts.write           {}", self.dram.writes);
        println!("  row.hits               {}", self.dram.row_hits);
        println!("  row.misses             {}", self.dram.row_misses);
        println!("==========================================================");
    }
}
