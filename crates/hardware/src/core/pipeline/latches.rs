//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five stages:
//! Fetch → Decode → Execute → Memory → Write-back.
//!
//! 1. **Instruction Flow:** One entry per latch; a stage register holds at most one instruction.
//! 2. **Bubbles:** `Default` entries carry no control and have no side effects.
//! 3. **Squash:** Entries overtaken by a taken branch keep their PC and word for tracing
//!    but lose their control signals.

use serde::Serialize;

use crate::core::pipeline::signals::{ControlSignals, WbSelect};

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Return address (PC + 4).
    pub ret: u32,
    /// 32-bit instruction encoding.
    pub ir: u32,
    /// `false` for bubbles and squashed fetches; Decode treats the word as a no-op.
    pub valid: bool,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Return address (PC + 4).
    pub ret: u32,
    /// 32-bit instruction encoding.
    pub ir: u32,
    /// Sign-extended immediate value.
    pub imm: u32,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Value read from rs1.
    pub rv1: u32,
    /// Value read from rs2.
    pub rv2: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
}

impl IdExEntry {
    /// Returns this entry with its control signals cleared.
    pub fn squashed(self) -> Self {
        Self {
            ctrl: ControlSignals::default(),
            ..self
        }
    }
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Return address (PC + 4).
    pub ret: u32,
    /// 32-bit instruction encoding.
    pub ir: u32,
    /// ALU result; the effective address for loads and stores.
    pub alu: u32,
    /// Value of rs2 (store data).
    pub store_data: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
}

/// Entry in the MEM/WB pipeline latch (Memory to Write-back stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Return address (PC + 4).
    pub ret: u32,
    /// 32-bit instruction encoding.
    pub ir: u32,
    /// ALU result.
    pub alu: u32,
    /// Extended load result.
    pub load_data: u32,
    /// Control signals for write-back.
    pub ctrl: ControlSignals,
}

impl MemWbEntry {
    /// Returns the value selected for the destination register.
    pub const fn result(&self) -> u32 {
        match self.ctrl.wb_sel {
            WbSelect::Alu => self.alu,
            WbSelect::Memory => self.load_data,
            WbSelect::ReturnAddress => self.ret,
        }
    }
}
