//! DRAM Buffer Implementation.
//!
//! This module provides the backing store for the single DRAM channel. It provides:
//! 1. **Storage:** An owned, word-addressed `Vec<u32>` sized to a power of two.
//! 2. **Wrapping:** Every access masks its word index, so out-of-range addresses alias
//!    rather than fault.
//! 3. **Image loading:** Copies a little-endian byte image into the words starting at 0.

use crate::common::constants::{RAM_FILL_TAG, WORD_BYTES};
use crate::common::{Result, SimError};
use crate::config::RamFill;

/// Word-addressed DRAM contents.
#[derive(Clone, Debug)]
pub struct DramBuffer {
    words: Vec<u32>,
    mask: usize,
}

impl DramBuffer {
    /// Creates a buffer of `words` 32-bit words filled with `fill`.
    ///
    /// # Arguments
    ///
    /// * `words` - Size in words; callers validate that it is a power of two.
    /// * `fill` - Initial contents.
    pub fn new(words: usize, fill: RamFill) -> Self {
        let words = words.max(1).next_power_of_two();
        let contents = match fill {
            RamFill::Zero => vec![0; words],
            RamFill::AddressTagged => (0..words)
                .map(|i| ((i as u32) << 2) | RAM_FILL_TAG)
                .collect(),
        };
        Self {
            words: contents,
            mask: words - 1,
        }
    }

    /// Returns the size of the buffer in words.
    pub fn len_words(&self) -> usize {
        self.words.len()
    }

    /// Returns the size of the buffer in bytes.
    pub fn len_bytes(&self) -> usize {
        self.words.len() * WORD_BYTES as usize
    }

    /// Reads the word containing byte address `addr`.
    #[inline]
    pub fn read(&self, addr: u32) -> u32 {
        self.words[self.slot(addr)]
    }

    /// Writes the word containing byte address `addr`.
    #[inline]
    pub fn write(&mut self, addr: u32, value: u32) {
        let slot = self.slot(addr);
        self.words[slot] = value;
    }

    /// Copies a little-endian byte image into memory starting at word 0.
    ///
    /// A trailing partial word is zero-padded.
    ///
    /// # Arguments
    ///
    /// * `image` - Raw image bytes.
    ///
    /// # Returns
    ///
    /// `SimError::ImageTooLarge` if the image does not fit.
    pub fn load_bytes(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > self.len_bytes() {
            return Err(SimError::ImageTooLarge {
                size: image.len(),
                capacity: self.len_bytes(),
            });
        }
        for (slot, chunk) in image.chunks(WORD_BYTES as usize).enumerate() {
            let mut bytes = [0u8; 4];
            bytes[..chunk.len()].copy_from_slice(chunk);
            self.words[slot] = u32::from_le_bytes(bytes);
        }
        Ok(())
    }

    /// Copies words into memory starting at word 0.
    ///
    /// # Returns
    ///
    /// `SimError::ImageTooLarge` if the words do not fit.
    pub fn load_words(&mut self, words: &[u32]) -> Result<()> {
        if words.len() > self.words.len() {
            return Err(SimError::ImageTooLarge {
                size: words.len() * WORD_BYTES as usize,
                capacity: self.len_bytes(),
            });
        }
        self.words[..words.len()].copy_from_slice(words);
        Ok(())
    }

    #[inline]
    const fn slot(&self, addr: u32) -> usize {
        (addr >> 2) as usize & self.mask
    }
}
