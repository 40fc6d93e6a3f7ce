//! Last-used tracking for two-way replacement.
//!
//! With two ways, remembering which way was touched last is exact LRU: the victim
//! is always the other one. One bit per index is the whole policy.

use super::Way;
use crate::common::constants::CACHE_SETS;

/// Per-index last-used way.
#[derive(Clone, Debug)]
pub struct LastUsed {
    bits: Vec<Way>,
}

impl LastUsed {
    /// Creates the table with every index pointing at the second way, so the
    /// first fill of an index lands in the first way.
    pub fn new() -> Self {
        Self {
            bits: vec![Way::Second; CACHE_SETS],
        }
    }

    /// Records an access to `way` at `index`.
    #[inline]
    pub fn touch(&mut self, index: usize, way: Way) {
        self.bits[index] = way;
    }

    /// Returns the way most recently touched at `index`.
    #[inline]
    pub fn last(&self, index: usize) -> Way {
        self.bits[index]
    }

    /// Returns the way to replace at `index` (the one not used last).
    #[inline]
    pub fn victim(&self, index: usize) -> Way {
        self.bits[index].other()
    }
}

impl Default for LastUsed {
    fn default() -> Self {
        Self::new()
    }
}
