//! Load/Store Unit (LSU).
//!
//! The data cache is word-granular with a byte-enable mask. This module converts
//! between that interface and RV32I's byte/half/word accesses. It provides:
//! 1. **Store steering:** Shifts the store data into its byte lane and builds the mask.
//! 2. **Load extraction:** Selects the addressed lane from a loaded word and extends it.
//!
//! Misaligned accesses are not trapped; the lane offset simply wraps within the word.

use crate::core::pipeline::signals::MemWidth;

/// A store prepared for the word-granular data cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreLane {
    /// Store data shifted into position.
    pub data: u32,
    /// One bit per byte lane to be written (bit 0 = byte at offset 0).
    pub mask: u8,
}

/// Load/Store Unit lane logic.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Places store data in the byte lanes addressed by `addr`.
    ///
    /// # Arguments
    ///
    /// * `addr` - Effective byte address.
    /// * `data` - Value of rs2.
    /// * `width` - Access width.
    ///
    /// # Returns
    ///
    /// The shifted data and byte mask. `MemWidth::Nop` yields an empty mask.
    pub const fn store_lane(addr: u32, data: u32, width: MemWidth) -> StoreLane {
        match width {
            MemWidth::Nop => StoreLane { data: 0, mask: 0 },
            MemWidth::Byte => {
                let lane = addr & 0x3;
                StoreLane {
                    data: (data & 0xFF) << (lane * 8),
                    mask: 1 << lane,
                }
            }
            MemWidth::Half => {
                let lane = addr & 0x2;
                StoreLane {
                    data: (data & 0xFFFF) << (lane * 8),
                    mask: 0b11 << lane,
                }
            }
            MemWidth::Word => StoreLane {
                data,
                mask: 0b1111,
            },
        }
    }

    /// Extracts and extends the addressed lane of a loaded word.
    ///
    /// # Arguments
    ///
    /// * `word` - The full word returned by the data cache.
    /// * `addr` - Effective byte address.
    /// * `width` - Access width.
    /// * `unsigned` - Zero-extend instead of sign-extend.
    ///
    /// # Returns
    ///
    /// The register value for the load.
    pub const fn load_extract(word: u32, addr: u32, width: MemWidth, unsigned: bool) -> u32 {
        match width {
            MemWidth::Byte => {
                let byte = (word >> ((addr & 0x3) * 8)) & 0xFF;
                if unsigned {
                    byte
                } else {
                    byte as u8 as i8 as i32 as u32
                }
            }
            MemWidth::Half => {
                let half = (word >> ((addr & 0x2) * 8)) & 0xFFFF;
                if unsigned {
                    half
                } else {
                    half as u16 as i16 as i32 as u32
                }
            }
            MemWidth::Word | MemWidth::Nop => word,
        }
    }

    /// Merges masked store data into an existing word.
    ///
    /// # Arguments
    ///
    /// * `old` - The word currently held by the cache.
    /// * `data` - Lane-shifted store data.
    /// * `mask` - Byte-enable mask.
    pub const fn merge(old: u32, data: u32, mask: u8) -> u32 {
        let mut bits = 0u32;
        let mut lane = 0;
        while lane < 4 {
            if mask & (1 << lane) != 0 {
                bits |= 0xFF << (lane * 8);
            }
            lane += 1;
        }
        (old & !bits) | (data & bits)
    }
}
