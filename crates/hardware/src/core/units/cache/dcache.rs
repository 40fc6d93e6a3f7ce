//! Data cache with write-back queue.
//!
//! Two-way cache serving loads and stores from the Memory stage. It provides:
//! 1. **Reads:** Same hit/miss/fill behavior as the instruction cache.
//! 2. **Writes:** A store hit merges its bytes and queues the line for write-back; a
//!    store miss fetches the line first and retries (fetch-on-write-miss).
//! 3. **Write-back drain:** Independently of CPU traffic, the oldest queued line is
//!    requested on the bus and streamed to DRAM word by word.
//!
//! Stall conditions, all reported as `valid = false`:
//! - a line fill is in progress or completed this cycle;
//! - a store hit on a line not yet queued while the queue is full (backpressure);
//! - a store to the line currently streaming to DRAM;
//! - a miss whose victim is still queued (dirty lines are never evicted).

use super::write_queue::{Enqueue, WriteBackEntry, WriteQueue};
use super::{
    CacheAccess, CacheArrays, CachePorts, CacheRequest, CacheStats, FillProgress, FillState,
    LineFill, Way,
};
use crate::common::CacheAddr;
use crate::soc::interconnect::BusSignals;
use crate::soc::traits::Clocked;

/// Write-back drain phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
pub enum DrainState {
    /// Queue empty.
    #[default]
    Idle,
    /// Write-back of the queue head requested, waiting for the bus.
    Requesting,
    /// Queue head streaming to DRAM.
    Writing,
}

/// Two-way data cache.
#[derive(Debug)]
pub struct DCache {
    /// Load/store request, written by the pipeline.
    pub request: CacheRequest,
    /// Bus signals, written by the arbiter.
    pub bus: BusSignals,
    out: CachePorts,
    next: CachePorts,
    arrays: CacheArrays,
    fill: LineFill,
    queue: WriteQueue,
    drain: DrainState,
    /// Hit/miss and write-back counters.
    pub stats: CacheStats,
}

impl DCache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `queue_depth` - Capacity of the write-back queue.
    pub fn new(queue_depth: usize) -> Self {
        Self {
            request: CacheRequest::default(),
            bus: BusSignals::default(),
            out: CachePorts::default(),
            next: CachePorts::default(),
            arrays: CacheArrays::new(),
            fill: LineFill::default(),
            queue: WriteQueue::new(queue_depth),
            drain: DrainState::Idle,
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

    /// Returns the write-back queue.
    pub const fn write_queue(&self) -> &WriteQueue {
        &self.queue
    }

    /// Returns the line fill phase.
    pub const fn fill_state(&self) -> FillState {
        self.fill.state()
    }

    /// Returns the write-back drain phase.
    pub const fn drain_state(&self) -> DrainState {
        self.drain
    }

    /// Returns `true` if the line in `way` at `index` is streaming to DRAM.
    fn is_draining(&self, way: Way, index: usize) -> bool {
        self.drain == DrainState::Writing
            && self
                .queue
                .front()
                .is_some_and(|e| e.way == way && e.index() == index)
    }

    /// Advances the write-back drain by one cycle.
    fn step_drain(&mut self, next: &mut CachePorts) {
        match self.drain {
            DrainState::Writing => {
                if self.bus.data_request {
                    if let Some(head) = self.queue.front() {
                        next.write_data = self.arrays.read_word(head.way, CacheAddr(self.bus.addr));
                    }
                }
                if self.bus.last {
                    if let Some(done) = self.queue.pop() {
                        tracing::trace!(line = done.line, "write-back complete");
                    }
                    self.stats.write_backs += 1;
                    self.drain = DrainState::Idle;
                }
            }
            DrainState::Requesting if self.bus.write_ack => self.drain = DrainState::Writing,
            DrainState::Requesting | DrainState::Idle => {}
        }

        if self.drain != DrainState::Writing {
            if let Some(head) = self.queue.front() {
                self.drain = DrainState::Requesting;
                next.write_req = true;
                next.write_addr = head.line;
            } else {
                self.drain = DrainState::Idle;
            }
        }
    }

    /// Serves a store that hit in `way`.
    fn write_hit(&mut self, way: Way, addr: CacheAddr, req: CacheRequest, next: &mut CachePorts) {
        let index = addr.index();
        if self.is_draining(way, index) {
            self.stats.write_back_conflicts += 1;
            next.access = CacheAccess::Busy;
            return;
        }

        let entry = WriteBackEntry {
            line: addr.line(),
            way,
        };
        match self.queue.push(entry) {
            Enqueue::Added | Enqueue::AlreadyQueued => {
                self.arrays.merge_word(way, addr, req.write_data, req.byte_mask);
                self.arrays.touch(way, index);
                self.stats.hits += 1;
                next.valid = true;
                next.access = CacheAccess::Hit;
            }
            Enqueue::Full => {
                self.stats.write_queue_overflows += 1;
                next.access = CacheAccess::Busy;
                tracing::debug!(
                    line = entry.line,
                    depth = self.queue.capacity(),
                    "write-back queue full; store stalled"
                );
            }
        }
    }
}

impl Clocked for DCache {
    fn update(&mut self) {
        let mut next = CachePorts::default();

        self.step_drain(&mut next);

        let req = self.request;
        if self.fill.step(&self.bus, &mut self.arrays, &mut next) == FillProgress::Idle {
            if req.read || req.write {
                let addr = CacheAddr(req.addr);
                let index = addr.index();
                match self.arrays.lookup(addr) {
                    Some(way) if req.write => self.write_hit(way, addr, req, &mut next),
                    Some(way) => {
                        next.read_data = self.arrays.read_word(way, addr);
                        next.valid = true;
                        next.access = CacheAccess::Hit;
                        self.arrays.touch(way, index);
                        self.stats.hits += 1;
                    }
                    None => {
                        let way = self.arrays.victim(index);
                        if self.queue.is_queued(way, index) {
                            self.stats.eviction_waits += 1;
                            next.access = CacheAccess::Busy;
                        } else {
                            tracing::trace!(addr = req.addr, ?way, write = req.write, "dcache miss");
                            self.fill.start(way, addr, &mut self.arrays, &mut next);
                            next.access = CacheAccess::Miss;
                            self.stats.misses += 1;
                        }
                    }
                }
            } else {
                next.valid = true;
            }
        } else if req.read || req.write {
            next.access = CacheAccess::Busy;
        }

        next.queue_full = self.queue.is_full();
        next.queue_len = self.queue.len();
        self.next = next;
    }

    fn commit(&mut self) {
        self.out = self.next;
    }
}
