//! Instruction pipeline implementation.
//!
//! This module contains the five-stage in-order pipeline. It includes the following components:
//! 1. **Hazards:** Detection of read-after-write dependencies (stall-on-hazard, no forwarding).
//! 2. **Latches:** Inter-stage registers between Fetch, Decode, Execute, Memory, and Write-back.
//! 3. **Signals:** Control signals generated during instruction decoding.
//! 4. **Stages:** Combinational logic of each stage.

/// Pipeline hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
