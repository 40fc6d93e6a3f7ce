//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. Besides
//! arithmetic results it computes load/store addresses and branch/jump targets,
//! since every control-flow class routes `pc + imm` or `rs1 + imm` through it.

use crate::core::pipeline::signals::AluOp;

/// Mask applied to operand B for shift amounts.
const SHAMT_MASK: u32 = 0x1F;

/// Arithmetic Logic Unit (ALU) for RV32I integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform.
    /// * `a` - First operand.
    /// * `b` - Second operand; only its low five bits are used as a shift amount.
    ///
    /// # Returns
    ///
    /// The 32-bit result. Addition and subtraction wrap.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvemu_core::core::pipeline::signals::AluOp;
    /// use rvemu_core::core::units::alu::Alu;
    ///
    /// assert_eq!(Alu::execute(AluOp::Sub, 3, 5), (-2i32) as u32);
    /// assert_eq!(Alu::execute(AluOp::Sra, 0x8000_0000, 4), 0xF800_0000);
    /// ```
    pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        let shamt = b & SHAMT_MASK;
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Sll => a << shamt,
            AluOp::Slt => ((a as i32) < (b as i32)) as u32,
            AluOp::Sltu => (a < b) as u32,
            AluOp::Xor => a ^ b,
            AluOp::Srl => a >> shamt,
            AluOp::Sra => ((a as i32) >> shamt) as u32,
            AluOp::Or => a | b,
            AluOp::And => a & b,
        }
    }
}
