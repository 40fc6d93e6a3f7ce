//! Pipeline stage implementations.
//!
//! This module contains the combinational logic of the five pipeline stages. It includes:
//! 1. **Fetch:** Drives the instruction cache with the PC.
//! 2. **Decode:** Decodes the instruction word into control signals and reads operands.
//! 3. **Execute:** Performs ALU operations and resolves branch targets.
//! 4. **Memory:** Drives the data cache and extracts load results.
//! 5. **Writeback:** Commits results to the register file.
//!
//! Every stage reads only committed latch contents. The latches themselves are
//! written by `Cpu::update_sequential`.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::{ExecuteOutput, execute_stage};
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry points (MEM stage).
pub use memory::{mem_result, mem_stage};
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
