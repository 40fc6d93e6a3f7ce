//! Instruction Decode (ID) Stage.
//!
//! Decodes the word in IF/ID into control signals and reads both source registers.
//! The register file is read before Write-back commits, so a value written this
//! cycle is not yet visible; hazard detection covers that distance.

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::SourceRegs;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode;

/// Decodes the instruction in IF/ID.
///
/// # Arguments
///
/// * `if_id` - Committed IF/ID latch.
/// * `regs` - Register file, before this cycle's write-back.
///
/// # Returns
///
/// The candidate ID/EX entry and the registers it reads. An invalid IF/ID entry
/// decodes to a bubble that reads nothing.
pub fn decode_stage(if_id: &IfIdEntry, regs: &Gpr) -> (IdExEntry, SourceRegs) {
    if !if_id.valid {
        let bubble = IdExEntry {
            pc: if_id.pc,
            ret: if_id.ret,
            ir: if_id.ir,
            ..IdExEntry::default()
        };
        return (bubble, SourceRegs::default());
    }

    let d = decode(if_id.ir);
    let ctrl = ControlSignals::from_decoded(&d);
    let entry = IdExEntry {
        pc: if_id.pc,
        ret: if_id.ret,
        ir: if_id.ir,
        imm: d.imm,
        rs1: d.rs1,
        rs2: d.rs2,
        rv1: regs.read(d.rs1),
        rv2: regs.read(d.rs2),
        ctrl,
    };
    (entry, SourceRegs::of(ctrl.class, d.rs1, d.rs2))
}
