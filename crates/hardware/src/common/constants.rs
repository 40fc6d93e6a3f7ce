//! Global Machine Constants.
//!
//! This module defines constants shared across the model. It includes:
//! 1. **Cache Geometry:** Sets, ways, line size, and the address field layout.
//! 2. **DRAM Layout:** Bank, row, and column field positions and burst length.
//! 3. **Fetch:** Instruction size.

/// Size of one machine word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Number of 32-bit words in one cache line (one DRAM burst).
pub const LINE_WORDS: usize = 8;

/// Size of one cache line in bytes.
pub const LINE_BYTES: u32 = 32;

/// Mask that clears the block and byte offset of an address.
pub const LINE_ADDR_MASK: u32 = !(LINE_BYTES - 1);

/// Number of sets (indices) per cache way.
pub const CACHE_SETS: usize = 256;

/// Number of ways per cache set.
pub const CACHE_WAYS: usize = 2;

/// Shift for the block (word) offset within a line.
pub const BLOCK_SHIFT: u32 = 2;

/// Mask for the block offset after shifting.
pub const BLOCK_MASK: u32 = 0x7;

/// Shift for the set index.
pub const INDEX_SHIFT: u32 = 5;

/// Mask for the set index after shifting.
pub const INDEX_MASK: u32 = 0xFF;

/// Shift for the tag; everything above the index.
pub const TAG_SHIFT: u32 = 13;

/// Default depth of the data cache write-back queue.
pub const WRITE_QUEUE_DEPTH: usize = 32;

/// Largest DRAM a 32-bit byte address can reach, in words.
pub const MAX_RAM_WORDS: usize = 1 << 30;

/// Shift for the DRAM bank field (bits 25:24).
pub const DRAM_BANK_SHIFT: u32 = 24;

/// Mask for the DRAM bank field after shifting.
pub const DRAM_BANK_MASK: u32 = 0x3;

/// Shift for the DRAM row field (bits 23:11).
pub const DRAM_ROW_SHIFT: u32 = 11;

/// Mask for the DRAM row field after shifting.
pub const DRAM_ROW_MASK: u32 = 0x1FFF;

/// Shift for the DRAM column field (bits 10:1).
pub const DRAM_COL_SHIFT: u32 = 1;

/// Mask for the DRAM column field after shifting.
pub const DRAM_COL_MASK: u32 = 0x3FF;

/// Words moved per DRAM burst.
pub const BURST_LENGTH: u8 = 8;

/// Cycles between a write-data request and the word arriving at the controller.
pub const WRITE_DATA_LAG: u8 = 2;

/// Tag OR-ed into every word of an address-tagged RAM fill.
pub const RAM_FILL_TAG: u32 = 0x5500_0000;

/// Size of an instruction in bytes; the PC advances by this each fetch.
pub const INSTRUCTION_SIZE: u32 = 4;
