//! Data Hazard Detection.
//!
//! There is no forwarding network: an instruction in Decode that reads a register an
//! older instruction has yet to write must wait until that instruction has passed
//! Write-back. This module provides:
//! 1. **Usage filtering:** Only source fields the opcode class actually reads are compared.
//! 2. **Distance checks:** rs1 and rs2 against the destinations latched in Execute,
//!    Memory, and Write-back (six comparisons).
//!
//! Decode reads the register file before Write-back commits within a cycle, so the
//! Write-back distance is a real hazard and costs one stall cycle.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry};
use crate::isa::instruction::OpClass;

/// Source registers an instruction in Decode will read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceRegs {
    /// rs1, if the opcode class reads it.
    pub rs1: Option<usize>,
    /// rs2, if the opcode class reads it.
    pub rs2: Option<usize>,
}

impl SourceRegs {
    /// Builds the set of registers actually read by an instruction.
    ///
    /// # Arguments
    ///
    /// * `class` - Opcode class of the instruction.
    /// * `rs1` - The rs1 field.
    /// * `rs2` - The rs2 field.
    ///
    /// # Returns
    ///
    /// The used source registers; `x0` is never a dependency.
    pub fn of(class: OpClass, rs1: usize, rs2: usize) -> Self {
        Self {
            rs1: (class.uses_rs1() && rs1 != 0).then_some(rs1),
            rs2: (class.uses_rs2() && rs2 != 0).then_some(rs2),
        }
    }

    fn depends_on(self, writes: impl Fn(usize) -> bool) -> bool {
        self.rs1.is_some_and(&writes) || self.rs2.is_some_and(&writes)
    }
}

/// Checks whether Decode must stall on a read-after-write dependency.
///
/// # Arguments
///
/// * `src` - Registers read by the instruction in Decode.
/// * `id_ex` - Instruction in Execute.
/// * `ex_mem` - Instruction in Memory.
/// * `mem_wb` - Instruction in Write-back.
///
/// # Returns
///
/// `true` if any used source matches a pending destination.
///
/// # Examples
///
/// ```
/// use rvemu_core::core::pipeline::hazards::{need_stall_data, SourceRegs};
/// use rvemu_core::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry};
/// use rvemu_core::core::pipeline::signals::ControlSignals;
/// use rvemu_core::isa::OpClass;
///
/// // EX: addi x1, x0, 5     ID: add x2, x1, x1
/// let ex = IdExEntry {
///     ctrl: ControlSignals { rd: 1, reg_write: true, ..ControlSignals::default() },
///     ..IdExEntry::default()
/// };
/// let src = SourceRegs::of(OpClass::Op, 1, 1);
/// assert!(need_stall_data(src, &ex, &ExMemEntry::default(), &MemWbEntry::default()));
/// ```
pub fn need_stall_data(src: SourceRegs, id_ex: &IdExEntry, ex_mem: &ExMemEntry, mem_wb: &MemWbEntry) -> bool {
    src.depends_on(|r| id_ex.ctrl.writes(r))
        || src.depends_on(|r| ex_mem.ctrl.writes(r))
        || src.depends_on(|r| mem_wb.ctrl.writes(r))
}
