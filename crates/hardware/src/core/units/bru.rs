//! Branch Resolution Unit (BRU).
//!
//! Evaluates branch conditions in the Execute stage. There is no predictor:
//! fetch always continues at PC + 4 and a taken branch is repaired by squashing.

use crate::core::pipeline::signals::BranchOp;

/// Branch condition evaluator.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Decides whether a control-flow instruction redirects the PC.
    ///
    /// # Arguments
    ///
    /// * `op` - The branch operation.
    /// * `a` - Value of rs1.
    /// * `b` - Value of rs2.
    ///
    /// # Returns
    ///
    /// `true` for jumps and for satisfied branch conditions.
    pub const fn taken(op: BranchOp, a: u32, b: u32) -> bool {
        match op {
            BranchOp::None => false,
            BranchOp::Jump => true,
            BranchOp::Eq => a == b,
            BranchOp::Ne => a != b,
            BranchOp::Lt => (a as i32) < (b as i32),
            BranchOp::Ge => (a as i32) >= (b as i32),
            BranchOp::Ltu => a < b,
            BranchOp::Geu => a >= b,
        }
    }
}
