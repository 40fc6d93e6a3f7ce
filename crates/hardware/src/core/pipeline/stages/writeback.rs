//! Writeback (WB) Stage.
//!
//! Commits the selected result of the instruction in MEM/WB to the register file.
//! The write is repeated every cycle the entry is held; it is idempotent.

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::MemWbEntry;

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `mem_wb` - Committed MEM/WB latch.
/// * `regs` - Register file; writes to x0 are dropped.
pub fn wb_stage(mem_wb: &MemWbEntry, regs: &mut Gpr) {
    if mem_wb.ctrl.reg_write {
        regs.write(mem_wb.ctrl.rd, mem_wb.result());
    }
}
