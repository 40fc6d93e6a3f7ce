//! Instruction cache.
//!
//! Read-only two-way cache in front of instruction fetch. Each cycle it either
//! advances an outstanding line fill or serves the fetch address: a hit returns the
//! word with `valid` set, a miss picks the not-last-used way and requests the line.

use super::{
    CacheAccess, CacheArrays, CachePorts, CacheRequest, CacheStats, FillProgress, FillState,
    LineFill,
};
use crate::common::CacheAddr;
use crate::soc::interconnect::BusSignals;
use crate::soc::traits::Clocked;

/// Two-way instruction cache.
#[derive(Debug)]
pub struct ICache {
    /// Fetch request, written by the pipeline.
    pub request: CacheRequest,
    /// Bus signals, written by the arbiter.
    pub bus: BusSignals,
    out: CachePorts,
    next: CachePorts,
    arrays: CacheArrays,
    fill: LineFill,
    /// Hit/miss counters.
    pub stats: CacheStats,
}

impl ICache {
    /// Creates an empty cache with every line invalid.
    pub fn new() -> Self {
        Self {
            request: CacheRequest::default(),
            bus: BusSignals::default(),
            out: CachePorts::default(),
            next: CachePorts::default(),
            arrays: CacheArrays::new(),
            fill: LineFill::default(),
            stats: CacheStats::default(),
        }
    }

    /// Returns the committed output signals.
    pub const fn ports(&self) -> &CachePorts {
        &self.out
    }

    /// Returns the tag/data arrays for inspection.
    pub const fn arrays(&self) -> &CacheArrays {
        &self.arrays
    }

    /// Returns the line fill phase.
    pub const fn fill_state(&self) -> FillState {
        self.fill.state()
    }
}

impl Default for ICache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clocked for ICache {
    fn update(&mut self) {
        let mut next = CachePorts::default();

        let req = self.request;
        if self.fill.step(&self.bus, &mut self.arrays, &mut next) == FillProgress::Idle {
            if req.read {
                let addr = CacheAddr(req.addr);
                if let Some(way) = self.arrays.lookup(addr) {
                    next.read_data = self.arrays.read_word(way, addr);
                    next.valid = true;
                    next.access = CacheAccess::Hit;
                    self.arrays.touch(way, addr.index());
                    self.stats.hits += 1;
                } else {
                    let way = self.arrays.victim(addr.index());
                    tracing::trace!(addr = req.addr, ?way, "icache miss");
                    self.fill.start(way, addr, &mut self.arrays, &mut next);
                    next.access = CacheAccess::Miss;
                    self.stats.misses += 1;
                }
            } else {
                next.valid = true;
            }
        } else if req.read {
            next.access = CacheAccess::Busy;
        }

        self.next = next;
    }

    fn commit(&mut self) {
        self.out = self.next;
    }
}
