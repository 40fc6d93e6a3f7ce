//! RISC-V General-Purpose Register File.
//!
//! This module implements the 32-entry integer register file read by Decode and
//! written by Write-back. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Exposes a snapshot for trace and exit-status output.

/// Number of architectural integer registers.
pub const GPR_COUNT: usize = 32;

/// General-Purpose Register file.
///
/// Register `x0` is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; GPR_COUNT],
}

impl Gpr {
    /// Creates a register file with all registers zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; GPR_COUNT],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index; only the low five bits are used.
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the register. Register `x0` always returns 0.
    pub const fn read(&self, idx: usize) -> u32 {
        self.regs[idx & (GPR_COUNT - 1)]
    }

    /// Writes a value to a general-purpose register; writes to `x0` are dropped.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index; only the low five bits are used.
    /// * `val` - The 32-bit value to write.
    pub const fn write(&mut self, idx: usize, val: u32) {
        let idx = idx & (GPR_COUNT - 1);
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all 32 registers, `x0` first.
    pub const fn snapshot(&self) -> [u32; GPR_COUNT] {
        self.regs
    }
}
