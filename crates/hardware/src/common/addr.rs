//! Address field extraction.
//!
//! Caches and the DRAM controller slice the same 32-bit physical address differently.
//! This module keeps both layouts in one place:
//! 1. **Cache layout:** tag (31:13), index (12:5), block offset (4:2), byte offset (1:0, ignored).
//! 2. **DRAM layout:** bank (25:24), row (23:11), column (10:1).

use super::constants::{
    BLOCK_MASK, BLOCK_SHIFT, DRAM_BANK_MASK, DRAM_BANK_SHIFT, DRAM_COL_MASK, DRAM_COL_SHIFT,
    DRAM_ROW_MASK, DRAM_ROW_SHIFT, INDEX_MASK, INDEX_SHIFT, LINE_ADDR_MASK, TAG_SHIFT,
};

/// A physical address viewed through the cache's tag/index/offset split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CacheAddr(pub u32);

impl CacheAddr {
    /// Returns the tag (upper address bits).
    #[inline]
    pub const fn tag(self) -> u32 {
        self.0 >> TAG_SHIFT
    }

    /// Returns the set index.
    #[inline]
    pub const fn index(self) -> usize {
        ((self.0 >> INDEX_SHIFT) & INDEX_MASK) as usize
    }

    /// Returns the word offset within the line.
    #[inline]
    pub const fn block(self) -> usize {
        ((self.0 >> BLOCK_SHIFT) & BLOCK_MASK) as usize
    }

    /// Returns the address of the first byte of the containing 32-byte line.
    #[inline]
    pub const fn line(self) -> u32 {
        self.0 & LINE_ADDR_MASK
    }

    /// Rebuilds a line address from a tag and an index.
    pub const fn from_parts(tag: u32, index: usize) -> Self {
        Self((tag << TAG_SHIFT) | ((index as u32) << INDEX_SHIFT))
    }
}

/// A physical address viewed through the DRAM bank/row/column split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DramAddr {
    /// Bank select (bits 25:24). Decoded for tracing only; there is one channel.
    pub bank: u32,
    /// Row number (bits 23:11).
    pub row: u32,
    /// Column number (bits 10:1).
    pub column: u32,
}

impl DramAddr {
    /// Splits a byte address into its DRAM fields.
    pub const fn decode(addr: u32) -> Self {
        Self {
            bank: (addr >> DRAM_BANK_SHIFT) & DRAM_BANK_MASK,
            row: (addr >> DRAM_ROW_SHIFT) & DRAM_ROW_MASK,
            column: (addr >> DRAM_COL_SHIFT) & DRAM_COL_MASK,
        }
    }
}
