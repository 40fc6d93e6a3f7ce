//! Per-cycle state snapshots.
//!
//! A `Snapshot` is a read-only copy of the state visible at the end of a cycle. The
//! driver renders it either as text through `Display` or as one JSON object per line
//! through `serde_json`.

use std::fmt;

use serde::Serialize;

use crate::core::Cpu;
use crate::core::cpu::StallCause;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::units::cache::{CacheAccess, FillState};
use crate::core::units::cache::dcache::DrainState;
use crate::soc::System;
use crate::soc::interconnect::Requester;
use crate::soc::memory::controller::DramState;

/// Cache state visible in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheView {
    /// Committed `valid` output.
    pub valid: bool,
    /// Hit or miss of this cycle's request.
    pub access: CacheAccess,
    /// Line fill phase.
    pub fill: FillState,
}

/// Write-back side of the data cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WriteBackView {
    /// Drain phase.
    pub drain: DrainState,
    /// Entries waiting in the queue.
    pub queue_len: usize,
}

/// DRAM state visible in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DramView {
    /// Controller phase.
    pub state: DramState,
    /// Open row.
    pub row: Option<u32>,
}

/// State of the machine at the end of one cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cycle number, starting at 1.
    pub cycle: u64,
    /// Fetch PC for the next cycle.
    pub pc: u32,
    /// Stall cause of this cycle.
    pub stall: StallCause,
    /// IF/ID latch.
    pub if_id: IfIdEntry,
    /// ID/EX latch.
    pub id_ex: IdExEntry,
    /// EX/MEM latch.
    pub ex_mem: ExMemEntry,
    /// MEM/WB latch.
    pub mem_wb: MemWbEntry,
    /// Instruction cache.
    pub icache: CacheView,
    /// Data cache.
    pub dcache: CacheView,
    /// Data cache write-back queue.
    pub write_back: WriteBackView,
    /// Requester holding the bus.
    pub bus: Option<Requester>,
    /// DRAM controller.
    pub dram: DramView,
}

impl Snapshot {
    /// Copies the visible state of the core and memory system.
    pub fn capture(cpu: &Cpu, system: &System) -> Self {
        Self {
            cycle: cpu.stats.cycles,
            pc: cpu.pc,
            stall: cpu.last_stall,
            if_id: cpu.if_id,
            id_ex: cpu.id_ex,
            ex_mem: cpu.ex_mem,
            mem_wb: cpu.mem_wb,
            icache: CacheView {
                valid: system.icache.ports().valid,
                access: system.icache.ports().access,
                fill: system.icache.fill_state(),
            },
            dcache: CacheView {
                valid: system.dcache.ports().valid,
                access: system.dcache.ports().access,
                fill: system.dcache.fill_state(),
            },
            write_back: WriteBackView {
                drain: system.dcache.drain_state(),
                queue_len: system.dcache.write_queue().len(),
            },
            bus: system.bus.current(),
            dram: DramView {
                state: system.dram.state(),
                row: system.dram.active_row(),
            },
        }
    }
}

const fn access_label(access: CacheAccess) -> &'static str {
    match access {
        CacheAccess::None => "-",
        CacheAccess::Hit => "HIT",
        CacheAccess::Miss => "MISS",
        CacheAccess::Busy => "BUSY",
    }
}

fn fill_label(fill: FillState) -> String {
    match fill {
        FillState::Idle => "idle".to_owned(),
        FillState::Requesting { way, line } => format!("req {line:#010x}/{way:?}"),
        FillState::Filling { way, line } => format!("fill {line:#010x}/{way:?}"),
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[cycle {:>8}] pc={:#010x} stall={:?}", self.cycle, self.pc, self.stall)?;
        let valid = if self.if_id.valid { "" } else { " (bubble)" };
        writeln!(f, "  IF/ID  pc={:#010x} ir={:#010x}{valid}", self.if_id.pc, self.if_id.ir)?;
        writeln!(
            f,
            "  ID/EX  pc={:#010x} ir={:#010x} {:?} rv1={:#x} rv2={:#x} imm={:#x}",
            self.id_ex.pc, self.id_ex.ir, self.id_ex.ctrl.class, self.id_ex.rv1, self.id_ex.rv2, self.id_ex.imm
        )?;
        writeln!(
            f,
            "  EX/MEM pc={:#010x} ir={:#010x} {:?} alu={:#x}",
            self.ex_mem.pc, self.ex_mem.ir, self.ex_mem.ctrl.class, self.ex_mem.alu
        )?;
        writeln!(
            f,
            "  MEM/WB pc={:#010x} ir={:#010x} {:?} x{}={:#x}",
            self.mem_wb.pc,
            self.mem_wb.ir,
            self.mem_wb.ctrl.class,
            self.mem_wb.ctrl.rd,
            self.mem_wb.result()
        )?;
        writeln!(
            f,
            "  L1-I valid={} {} {}  L1-D valid={} {} {} drain={:?} wq={}",
            u8::from(self.icache.valid),
            access_label(self.icache.access),
            fill_label(self.icache.fill),
            u8::from(self.dcache.valid),
            access_label(self.dcache.access),
            fill_label(self.dcache.fill),
            self.write_back.drain,
            self.write_back.queue_len
        )?;
        let bus = self
            .bus
            .map_or_else(|| "idle".to_owned(), |r| format!("{r:?}"));
        let row = self
            .dram
            .row
            .map_or_else(|| "-".to_owned(), |r| format!("{r:#x}"));
        write!(f, "  bus={bus} dram={:?} row={row}", self.dram.state)
    }
}
