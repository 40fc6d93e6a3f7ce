//! CPU Core Definition and Cycle Phases.
//!
//! This module defines the `Cpu` structure, which holds the architectural and pipeline
//! state of the five-stage in-order core. Each cycle runs in two halves:
//! 1. **Combinational:** Every stage reads the committed latches, the caches receive
//!    their requests, and Write-back commits to the register file.
//! 2. **Sequential:** Using the committed cache outputs, the latches and PC advance
//!    under the stage clock-enables, or hold.
//!
//! Clock-enable policy: Execute, Memory, and Write-back advance whenever both caches
//! are ready. Fetch and Decode additionally require no data hazard and no pending
//! branch redirect. A taken branch squashes the instructions entering Fetch/Decode
//! and Decode/Execute and blocks Fetch for one extra cycle.
//!
//! A data access the cache completed while the instruction cache held the pipeline
//! is not presented again; its read word is kept until Memory advances.

use serde::Serialize;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::need_stall_data;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::pipeline::stages::{
    ExecuteOutput, decode_stage, execute_stage, fetch_stage, mem_result, mem_stage, wb_stage,
};
use crate::core::units::cache::{CachePorts, CacheRequest, DCache, ICache};
use crate::isa::OpClass;
use crate::stats::PipelineStats;

/// Values computed in the combinational half and consumed by the sequential half.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct StageOutputs {
    id_ex: IdExEntry,
    execute: ExecuteOutput,
    data_hazard: bool,
}

/// Why the front of the pipeline held this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum StallCause {
    /// The pipeline advanced.
    #[default]
    None,
    /// A cache was not ready; every stage held.
    Memory,
    /// Decode waited on a register an older instruction has yet to write.
    Data,
    /// Fetch was blocked while redirecting after a taken branch.
    Control,
}

/// Five-stage RV32I core.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    /// Program counter of the next fetch.
    pub pc: u32,
    /// Integer register file.
    pub regs: Gpr,
    /// IF/ID latch.
    pub if_id: IfIdEntry,
    /// ID/EX latch.
    pub id_ex: IdExEntry,
    /// EX/MEM latch.
    pub ex_mem: ExMemEntry,
    /// MEM/WB latch.
    pub mem_wb: MemWbEntry,
    /// A taken branch resolved last cycle; Fetch is held this cycle.
    pub branch_hazard: bool,
    /// Cause of the most recent stall.
    pub last_stall: StallCause,
    /// Read word of an EX/MEM access the data cache already completed.
    pub mem_held: Option<u32>,
    stage: StageOutputs,
    /// Pipeline counters.
    pub stats: PipelineStats,
}

impl Cpu {
    /// Creates a core with empty latches.
    ///
    /// # Arguments
    ///
    /// * `start_pc` - Address of the first fetch.
    pub fn new(start_pc: u32) -> Self {
        Self {
            pc: start_pc,
            ..Self::default()
        }
    }

    /// Runs the combinational half of a cycle.
    ///
    /// Drives the instruction and data cache requests from the PC and EX/MEM,
    /// evaluates Decode and Execute, and performs Write-back. Decode reads the
    /// register file before Write-back updates it.
    ///
    /// # Arguments
    ///
    /// * `icache` - Receives the fetch request.
    /// * `dcache` - Receives the load/store request.
    pub fn update_combinational(&mut self, icache: &mut ICache, dcache: &mut DCache) {
        icache.request = fetch_stage(self.pc);

        let (id_ex, src) = decode_stage(&self.if_id, &self.regs);
        let data_hazard = need_stall_data(src, &self.id_ex, &self.ex_mem, &self.mem_wb);
        let execute = execute_stage(&self.id_ex);

        dcache.request = if self.mem_held.is_some() {
            CacheRequest::default()
        } else {
            mem_stage(&self.ex_mem)
        };

        wb_stage(&self.mem_wb, &mut self.regs);

        self.stage = StageOutputs {
            id_ex,
            execute,
            data_hazard,
        };
    }

    /// Runs the sequential half of a cycle.
    ///
    /// # Arguments
    ///
    /// * `icache` - Committed instruction cache outputs.
    /// * `dcache` - Committed data cache outputs.
    pub fn update_sequential(&mut self, icache: &CachePorts, dcache: &CachePorts) {
        let ready = icache.valid && dcache.valid;
        let taken = self.stage.execute.taken;
        // A hazard against an instruction about to be squashed is moot.
        let data_hazard = self.stage.data_hazard && !taken;
        let ce_front = ready && !data_hazard && !self.branch_hazard;

        self.stats.cycles += 1;
        self.last_stall = if !ready {
            self.stats.stalls_mem += 1;
            StallCause::Memory
        } else if data_hazard {
            self.stats.stalls_data += 1;
            StallCause::Data
        } else if self.branch_hazard {
            self.stats.stalls_control += 1;
            StallCause::Control
        } else {
            StallCause::None
        };

        if !ready {
            let ctrl = self.ex_mem.ctrl;
            if dcache.valid && (ctrl.mem_read || ctrl.mem_write) && self.mem_held.is_none() {
                self.mem_held = Some(dcache.read_data);
            }
            return;
        }

        let read_data = self.mem_held.take().unwrap_or(dcache.read_data);
        self.mem_wb = mem_result(&self.ex_mem, read_data);
        if self.mem_wb.ctrl.class != OpClass::Invalid {
            self.stats.instructions_retired += 1;
        }
        self.ex_mem = self.stage.execute.ex_mem;

        self.id_ex = if taken {
            self.stage.id_ex.squashed()
        } else if ce_front {
            self.stage.id_ex
        } else {
            IdExEntry::default()
        };

        if taken {
            tracing::trace!(
                pc = self.stage.execute.ex_mem.pc,
                target = self.stage.execute.target,
                "branch taken"
            );
            self.stats.branches_taken += 1;
            self.if_id = IfIdEntry {
                valid: false,
                ..self.if_id
            };
            self.pc = self.stage.execute.target;
        } else if ce_front {
            self.if_id = IfIdEntry {
                pc: self.pc,
                ret: self.pc.wrapping_add(INSTRUCTION_SIZE),
                ir: icache.read_data,
                valid: true,
            };
            self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
        }

        self.branch_hazard = taken;
    }
}
