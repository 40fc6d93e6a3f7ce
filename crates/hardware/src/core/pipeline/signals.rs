//! Pipeline control signals and operation types.
//!
//! This module defines the signals generated in Decode that steer every later stage. It performs:
//! 1. **Operation Classification:** Maps opcode classes to ALU and branch operations.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, PC, zero, or immediates).
//! 3. **Memory Control:** Specifies access widths and sign-extension requirements.
//! 4. **Write-back Control:** Selects the value committed to the destination register.
//!
//! A default `ControlSignals` is a bubble: no register write, no cache access, no branch.

use serde::Serialize;

use crate::isa::instruction::{Decoded, OpClass};
use crate::isa::opcodes::{self, FUNCT7_ALT};

/// ALU operation types for RV32I instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum AluOp {
    /// Integer addition; also address and target generation.
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,
}

impl AluOp {
    /// Selects the ALU operation for an OP or OP-IMM instruction.
    ///
    /// # Arguments
    ///
    /// * `funct3` - The funct3 field.
    /// * `alt` - Instruction bit 30. Selects SUB for OP and SRA for both classes.
    /// * `is_imm` - `true` for OP-IMM, where bit 30 never selects SUB.
    pub const fn from_funct(funct3: u32, alt: bool, is_imm: bool) -> Self {
        match funct3 {
            opcodes::alu::ADD_SUB if alt && !is_imm => Self::Sub,
            opcodes::alu::ADD_SUB => Self::Add,
            opcodes::alu::SLL => Self::Sll,
            opcodes::alu::SLT => Self::Slt,
            opcodes::alu::SLTU => Self::Sltu,
            opcodes::alu::XOR => Self::Xor,
            opcodes::alu::SRL_SRA if alt => Self::Sra,
            opcodes::alu::SRL_SRA => Self::Srl,
            opcodes::alu::OR => Self::Or,
            _ => Self::And,
        }
    }
}

/// Branch unit operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum BranchOp {
    /// Not a control-flow instruction.
    #[default]
    None,
    /// Unconditional jump (JAL, JALR).
    Jump,
    /// Branch if equal.
    Eq,
    /// Branch if not equal.
    Ne,
    /// Branch if less than (signed).
    Lt,
    /// Branch if greater or equal (signed).
    Ge,
    /// Branch if less than (unsigned).
    Ltu,
    /// Branch if greater or equal (unsigned).
    Geu,
}

impl BranchOp {
    /// Maps a conditional branch funct3 to its comparison; reserved encodings never branch.
    pub const fn from_funct3(funct3: u32) -> Self {
        match funct3 {
            opcodes::branch::BEQ => Self::Eq,
            opcodes::branch::BNE => Self::Ne,
            opcodes::branch::BLT => Self::Lt,
            opcodes::branch::BGE => Self::Ge,
            opcodes::branch::BLTU => Self::Ltu,
            opcodes::branch::BGEU => Self::Geu,
            _ => Self::None,
        }
    }
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum MemWidth {
    /// No memory operation.
    #[default]
    Nop,

    /// 8-bit byte access.
    Byte,

    /// 16-bit half-word access.
    Half,

    /// 32-bit word access.
    Word,
}

impl MemWidth {
    /// Returns the width and zero-extension flag encoded in a load/store funct3.
    pub const fn from_funct3(funct3: u32) -> (Self, bool) {
        match funct3 {
            opcodes::mem::BYTE => (Self::Byte, false),
            opcodes::mem::HALF => (Self::Half, false),
            opcodes::mem::BYTE_U => (Self::Byte, true),
            opcodes::mem::HALF_U => (Self::Half, true),
            _ => (Self::Word, false),
        }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,

    /// Use program counter value.
    Pc,

    /// Use zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum OpBSrc {
    /// Use sign-extended immediate value.
    #[default]
    Imm,

    /// Use `rs2` register value.
    Reg2,
}

/// Value committed to the destination register in Write-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum WbSelect {
    /// ALU result.
    #[default]
    Alu,
    /// Load result from the data cache.
    Memory,
    /// Return address (PC + 4) for JAL and JALR.
    ReturnAddress,
}

/// Control signals for instruction execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub struct ControlSignals {
    /// Opcode class of the instruction.
    pub class: OpClass,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// Branch unit operation.
    pub branch: BranchOp,
    /// Enable data cache read (load).
    pub mem_read: bool,
    /// Enable data cache write (store).
    pub mem_write: bool,
    /// Width of memory access.
    pub width: MemWidth,
    /// Load is zero-extended (LBU, LHU).
    pub unsigned_load: bool,
    /// Write-back value selection.
    pub wb_sel: WbSelect,
    /// Destination register index.
    pub rd: usize,
    /// Enable write to the destination register.
    pub reg_write: bool,
}

impl ControlSignals {
    /// Generates control signals for a decoded instruction.
    ///
    /// # Arguments
    ///
    /// * `d` - The decoded instruction.
    ///
    /// # Returns
    ///
    /// The control signals; an `Invalid` class yields a bubble.
    pub const fn from_decoded(d: &Decoded) -> Self {
        let class = d.class();
        let alt = d.funct7 == FUNCT7_ALT;
        let bubble = Self {
            class: OpClass::Invalid,
            alu: AluOp::Add,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Imm,
            branch: BranchOp::None,
            mem_read: false,
            mem_write: false,
            width: MemWidth::Nop,
            unsigned_load: false,
            wb_sel: WbSelect::Alu,
            rd: 0,
            reg_write: false,
        };
        let base = Self {
            class,
            rd: d.rd,
            reg_write: true,
            ..bubble
        };

        match class {
            OpClass::Load => {
                let (width, unsigned_load) = MemWidth::from_funct3(d.funct3);
                Self {
                    mem_read: true,
                    width,
                    unsigned_load,
                    wb_sel: WbSelect::Memory,
                    ..base
                }
            }
            OpClass::Store => {
                let (width, _) = MemWidth::from_funct3(d.funct3);
                Self {
                    mem_write: true,
                    width,
                    rd: 0,
                    reg_write: false,
                    ..base
                }
            }
            OpClass::Jal => Self {
                a_src: OpASrc::Pc,
                branch: BranchOp::Jump,
                wb_sel: WbSelect::ReturnAddress,
                ..base
            },
            OpClass::Jalr => Self {
                branch: BranchOp::Jump,
                wb_sel: WbSelect::ReturnAddress,
                ..base
            },
            OpClass::OpImm => Self {
                alu: AluOp::from_funct(d.funct3, alt, true),
                ..base
            },
            OpClass::Op => Self {
                alu: AluOp::from_funct(d.funct3, alt, false),
                b_src: OpBSrc::Reg2,
                ..base
            },
            OpClass::Auipc => Self {
                a_src: OpASrc::Pc,
                ..base
            },
            OpClass::Lui => Self {
                a_src: OpASrc::Zero,
                ..base
            },
            OpClass::Branch => Self {
                a_src: OpASrc::Pc,
                branch: BranchOp::from_funct3(d.funct3),
                rd: 0,
                reg_write: false,
                ..base
            },
            OpClass::Invalid => bubble,
        }
    }

    /// Returns `true` if this instruction will write `reg` (x0 never counts).
    #[inline]
    pub const fn writes(&self, reg: usize) -> bool {
        self.reg_write && self.rd != 0 && self.rd == reg
    }
}
