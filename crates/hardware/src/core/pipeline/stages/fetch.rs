//! Instruction Fetch (IF) Stage.
//!
//! Presents the PC to the instruction cache. The fetched word is latched into IF/ID
//! by the sequential phase once the cache reports `valid`.

use crate::core::units::cache::CacheRequest;

/// Builds the instruction cache request for this cycle.
///
/// # Arguments
///
/// * `pc` - Current program counter.
///
/// # Returns
///
/// A word read at `pc`.
pub const fn fetch_stage(pc: u32) -> CacheRequest {
    CacheRequest {
        addr: pc,
        read: true,
        write: false,
        write_data: 0,
        byte_mask: 0,
    }
}
