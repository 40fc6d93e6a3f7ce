//! Memory Access (MEM) Stage.
//!
//! Drives the data cache from EX/MEM and, once the cache answers, extracts the
//! addressed lane of a load. Stores are steered into their byte lanes here; the
//! cache merges them under the byte mask.

use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::units::cache::CacheRequest;
use crate::core::units::lsu::Lsu;

/// Builds the data cache request for the instruction in EX/MEM.
///
/// # Arguments
///
/// * `ex_mem` - Committed EX/MEM latch.
///
/// # Returns
///
/// A read, a write, or an idle request for non-memory instructions.
pub const fn mem_stage(ex_mem: &ExMemEntry) -> CacheRequest {
    let ctrl = ex_mem.ctrl;
    if !ctrl.mem_read && !ctrl.mem_write {
        return CacheRequest {
            addr: 0,
            read: false,
            write: false,
            write_data: 0,
            byte_mask: 0,
        };
    }
    let lane = Lsu::store_lane(ex_mem.alu, ex_mem.store_data, ctrl.width);
    CacheRequest {
        addr: ex_mem.alu,
        read: ctrl.mem_read,
        write: ctrl.mem_write,
        write_data: lane.data,
        byte_mask: lane.mask,
    }
}

/// Builds the MEM/WB entry from EX/MEM and the data cache output.
///
/// # Arguments
///
/// * `ex_mem` - Committed EX/MEM latch.
/// * `read_data` - Word returned by the data cache this cycle.
pub const fn mem_result(ex_mem: &ExMemEntry, read_data: u32) -> MemWbEntry {
    let ctrl = ex_mem.ctrl;
    let load_data = if ctrl.mem_read {
        Lsu::load_extract(read_data, ex_mem.alu, ctrl.width, ctrl.unsigned_load)
    } else {
        0
    };
    MemWbEntry {
        pc: ex_mem.pc,
        ret: ex_mem.ret,
        ir: ex_mem.ir,
        alu: ex_mem.alu,
        load_data,
        ctrl,
    }
}
