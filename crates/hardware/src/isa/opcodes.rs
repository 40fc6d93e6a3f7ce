//! RISC-V Base Integer (RV32I) Opcodes.
//!
//! Defines the major opcodes (bits 6-0) and the funct3 encodings the pipeline needs.

/// Load instructions (LB, LH, LW, LBU, LHU).
pub const OP_LOAD: u32 = 0b0000011;

/// Immediate arithmetic instructions (ADDI, ANDI, SLLI, etc.).
pub const OP_IMM: u32 = 0b0010011;

/// Add Upper Immediate to PC (AUIPC).
pub const OP_AUIPC: u32 = 0b0010111;

/// Store instructions (SB, SH, SW).
pub const OP_STORE: u32 = 0b0100011;

/// Register-Register arithmetic (ADD, SUB, SLL, etc.).
pub const OP_REG: u32 = 0b0110011;

/// Load Upper Immediate (LUI).
pub const OP_LUI: u32 = 0b0110111;

/// Conditional Branch instructions (BEQ, BNE, etc.).
pub const OP_BRANCH: u32 = 0b1100011;

/// Jump and Link Register (JALR).
pub const OP_JALR: u32 = 0b1100111;

/// Jump and Link (JAL).
pub const OP_JAL: u32 = 0b1101111;

/// funct3 values for ALU operations (OP and OP-IMM).
pub mod alu {
    /// ADD / ADDI / SUB.
    pub const ADD_SUB: u32 = 0b000;
    /// SLL / SLLI.
    pub const SLL: u32 = 0b001;
    /// SLT / SLTI.
    pub const SLT: u32 = 0b010;
    /// SLTU / SLTIU.
    pub const SLTU: u32 = 0b011;
    /// XOR / XORI.
    pub const XOR: u32 = 0b100;
    /// SRL / SRLI / SRA / SRAI.
    pub const SRL_SRA: u32 = 0b101;
    /// OR / ORI.
    pub const OR: u32 = 0b110;
    /// AND / ANDI.
    pub const AND: u32 = 0b111;
}

/// funct3 values for conditional branches.
pub mod branch {
    /// BEQ.
    pub const BEQ: u32 = 0b000;
    /// BNE.
    pub const BNE: u32 = 0b001;
    /// BLT.
    pub const BLT: u32 = 0b100;
    /// BGE.
    pub const BGE: u32 = 0b101;
    /// BLTU.
    pub const BLTU: u32 = 0b110;
    /// BGEU.
    pub const BGEU: u32 = 0b111;
}

/// funct3 values for loads and stores (width and signedness).
pub mod mem {
    /// LB / SB.
    pub const BYTE: u32 = 0b000;
    /// LH / SH.
    pub const HALF: u32 = 0b001;
    /// LW / SW.
    pub const WORD: u32 = 0b010;
    /// LBU.
    pub const BYTE_U: u32 = 0b100;
    /// LHU.
    pub const HALF_U: u32 = 0b101;
}

/// funct7 bit 5 (instruction bit 30): selects SUB and SRA/SRAI.
pub const FUNCT7_ALT: u32 = 0b0100000;
