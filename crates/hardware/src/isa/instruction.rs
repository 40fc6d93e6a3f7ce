//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction for RV32I instruction fields and the decoded
//! representation handed to the pipeline.

use super::opcodes;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field after shifting.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Register 0 (x0) is hardwired to zero and writes to it are ignored.
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }
}

/// Instruction encoding format; determines how the immediate is assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
pub enum Format {
    /// Register-register; no immediate.
    R,
    /// 12-bit signed immediate in bits 31:20.
    I,
    /// 12-bit signed immediate split across bits 31:25 and 11:7.
    S,
    /// 13-bit signed, even branch offset.
    B,
    /// Upper 20 bits; low 12 bits zero.
    U,
    /// 21-bit signed, even jump offset.
    J,
    /// Opcode outside RV32I.
    #[default]
    Unknown,
}

impl Format {
    /// Returns the encoding format for a major opcode.
    pub const fn from_opcode(opcode: u32) -> Self {
        match opcode {
            opcodes::OP_REG => Self::R,
            opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => Self::I,
            opcodes::OP_STORE => Self::S,
            opcodes::OP_BRANCH => Self::B,
            opcodes::OP_LUI | opcodes::OP_AUIPC => Self::U,
            opcodes::OP_JAL => Self::J,
            _ => Self::Unknown,
        }
    }
}

/// Opcode class used by the pipeline to generate control signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
pub enum OpClass {
    /// LB, LH, LW, LBU, LHU.
    Load,
    /// SB, SH, SW.
    Store,
    /// Jump and link.
    Jal,
    /// Jump and link register.
    Jalr,
    /// Register-immediate ALU operation.
    OpImm,
    /// Register-register ALU operation.
    Op,
    /// Add upper immediate to PC.
    Auipc,
    /// Load upper immediate.
    Lui,
    /// Conditional branch.
    Branch,
    /// Unknown opcode or pipeline bubble; produces no side effects.
    #[default]
    Invalid,
}

impl OpClass {
    /// Classifies a major opcode.
    pub const fn from_opcode(opcode: u32) -> Self {
        match opcode {
            opcodes::OP_LOAD => Self::Load,
            opcodes::OP_STORE => Self::Store,
            opcodes::OP_JAL => Self::Jal,
            opcodes::OP_JALR => Self::Jalr,
            opcodes::OP_IMM => Self::OpImm,
            opcodes::OP_REG => Self::Op,
            opcodes::OP_AUIPC => Self::Auipc,
            opcodes::OP_LUI => Self::Lui,
            opcodes::OP_BRANCH => Self::Branch,
            _ => Self::Invalid,
        }
    }

    /// Returns `true` if instructions of this class read rs1.
    ///
    /// LUI, AUIPC, and JAL carry immediate bits where rs1 would be, so their
    /// rs1 field must not raise a hazard.
    pub const fn uses_rs1(self) -> bool {
        !matches!(self, Self::Lui | Self::Auipc | Self::Jal | Self::Invalid)
    }

    /// Returns `true` if instructions of this class read rs2.
    pub const fn uses_rs2(self) -> bool {
        matches!(self, Self::Branch | Self::Store | Self::Op)
    }
}

/// Decoded instruction fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Decoded {
    /// Raw instruction word.
    pub raw: u32,
    /// Encoding format.
    pub format: Format,
    /// Major opcode (bits 6-0).
    pub opcode: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// funct3 field.
    pub funct3: u32,
    /// funct7 field.
    pub funct7: u32,
    /// Sign-extended immediate, reinterpreted as a register word.
    pub imm: u32,
}

impl Decoded {
    /// Returns the opcode class of this instruction.
    pub const fn class(&self) -> OpClass {
        OpClass::from_opcode(self.opcode)
    }
}
