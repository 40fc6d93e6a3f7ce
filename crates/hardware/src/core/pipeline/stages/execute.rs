//! Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Operand selection:** Operand A from rs1, the PC, or zero; operand B from the
//!    immediate or rs2.
//! 2. **ALU:** Arithmetic, logic, address generation, and jump/branch targets.
//! 3. **Branch resolution:** Evaluates the condition on the two register values.
//!
//! Branches resolve here; there is no prediction. A taken branch redirects fetch
//! and squashes the two younger instructions.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;
use crate::isa::OpClass;

/// Result of the execute stage for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// Candidate EX/MEM entry.
    pub ex_mem: ExMemEntry,
    /// The instruction in Execute is a taken branch or a jump.
    pub taken: bool,
    /// Redirect target, meaningful when `taken`.
    pub target: u32,
}

/// Executes the instruction in ID/EX.
///
/// # Arguments
///
/// * `id_ex` - Committed ID/EX latch.
///
/// # Returns
///
/// The next EX/MEM entry and the branch outcome.
pub fn execute_stage(id_ex: &IdExEntry) -> ExecuteOutput {
    let ctrl = id_ex.ctrl;

    let a = match ctrl.a_src {
        OpASrc::Reg1 => id_ex.rv1,
        OpASrc::Pc => id_ex.pc,
        OpASrc::Zero => 0,
    };
    let b = match ctrl.b_src {
        OpBSrc::Imm => id_ex.imm,
        OpBSrc::Reg2 => id_ex.rv2,
    };

    let alu = Alu::execute(ctrl.alu, a, b);
    let taken = Bru::taken(ctrl.branch, id_ex.rv1, id_ex.rv2);
    let target = if ctrl.class == OpClass::Jalr { alu & !1 } else { alu };

    ExecuteOutput {
        ex_mem: ExMemEntry {
            pc: id_ex.pc,
            ret: id_ex.ret,
            ir: id_ex.ir,
            alu,
            store_data: id_ex.rv2,
            ctrl,
        },
        taken,
        target,
    }
}
