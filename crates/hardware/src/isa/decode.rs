//! RV32I Instruction Decoder.
//!
//! Splits a 32-bit instruction word into register indices, function codes, and a
//! sign-extended immediate. The decoder is a pure function; the all-zero word
//! used for pipeline bubbles decodes to an `Unknown` format with a zero immediate.

use crate::isa::instruction::{Decoded, Format, InstructionBits};

/// Decodes an instruction word into its component fields.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding.
///
/// # Returns
///
/// A `Decoded` structure; for unknown opcodes the immediate is zero.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    let format = Format::from_opcode(opcode);

    Decoded {
        raw: inst,
        format,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm: immediate(inst, format),
    }
}

/// Assembles the immediate for the given format.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding.
/// * `format` - The encoding format selected by the opcode.
///
/// # Returns
///
/// The sign-extended immediate as a register word.
pub const fn immediate(inst: u32, format: Format) -> u32 {
    match format {
        // imm[11:0] = inst[31:20]
        Format::I => ((inst as i32) >> 20) as u32,
        // imm[11:5] = inst[31:25], imm[4:0] = inst[11:7]
        Format::S => {
            let raw = ((inst >> 25) << 5) | ((inst >> 7) & 0x1F);
            sign_extend(raw, 12)
        }
        // imm[12|10:5] = inst[31|30:25], imm[4:1|11] = inst[11:8|7]
        Format::B => {
            let raw = ((inst >> 31) << 12)
                | (((inst >> 7) & 0x1) << 11)
                | (((inst >> 25) & 0x3F) << 5)
                | (((inst >> 8) & 0xF) << 1);
            sign_extend(raw, 13)
        }
        Format::U => inst & 0xFFFF_F000,
        // imm[20|10:1|11|19:12] = inst[31|30:21|20|19:12]
        Format::J => {
            let raw = ((inst >> 31) << 20)
                | (inst & 0x000F_F000)
                | (((inst >> 20) & 0x1) << 11)
                | (((inst >> 21) & 0x3FF) << 1);
            sign_extend(raw, 21)
        }
        Format::R | Format::Unknown => 0,
    }
}

/// Sign-extends the low `bits` bits of `val` to a full word.
const fn sign_extend(val: u32, bits: u32) -> u32 {
    let shift = 32 - bits;
    (((val << shift) as i32) >> shift) as u32
}
