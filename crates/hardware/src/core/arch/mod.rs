//! RISC-V architectural state.
//!
//! The modeled machine has no CSRs, privilege modes, or floating point; the only
//! architectural state besides the PC is the integer register file.

/// General-Purpose Register file implementation.
pub mod gpr;
