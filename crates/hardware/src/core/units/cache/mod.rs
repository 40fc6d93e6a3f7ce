//! Two-way set-associative L1 caches.
//!
//! This module holds what the instruction and data caches share. It provides:
//! 1. **Ports:** The CPU-side request and the output signals read by the pipeline and bus.
//! 2. **Arrays:** Tag, valid, and data storage for both ways plus the last-used bit.
//! 3. **Line fill:** The request/stream/install state machine that pulls one 32-byte
//!    line from the bus into a chosen way.
//!
//! Geometry is fixed: 256 sets, 2 ways, 8 words per line. Addresses split into tag
//! (31:13), index (12:5), and block offset (4:2); accesses are word granular.
//!
//! Hit detection reads the arrays as they stand at the start of the cycle, so a line
//! installed on cycle N hits on cycle N + 1 with `valid` asserted in that same cycle.

/// Data cache with write-back queue.
pub mod dcache;

/// Instruction cache.
pub mod icache;

/// Last-used bit per index (two-way LRU).
pub mod lru;

/// Write-back queue for dirty lines.
pub mod write_queue;

pub use dcache::DCache;
pub use icache::ICache;

use serde::Serialize;

use self::lru::LastUsed;
use crate::common::CacheAddr;
use crate::common::constants::{CACHE_SETS, LINE_ADDR_MASK, LINE_WORDS};
use crate::core::units::lsu::Lsu;
use crate::soc::interconnect::BusSignals;

/// One of the two parallel ways of a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum Way {
    /// Set 1.
    #[default]
    First,
    /// Set 2.
    Second,
}

impl Way {
    /// Both ways, in lookup order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// Returns the other way.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Returns the array slot for this way.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// CPU-side inputs, driven by the pipeline's combinational phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheRequest {
    /// Byte address.
    pub addr: u32,
    /// Read request.
    pub read: bool,
    /// Write request (data cache only).
    pub write: bool,
    /// Lane-shifted write data.
    pub write_data: u32,
    /// Byte-enable mask for the write.
    pub byte_mask: u8,
}

/// Outcome of the request presented this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum CacheAccess {
    /// No request.
    #[default]
    None,
    /// Served from the arrays.
    Hit,
    /// Missed; a line fill started.
    Miss,
    /// Held behind a fill, a full write-back queue, or a draining line.
    Busy,
}

/// Committed cache outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CachePorts {
    /// Word read this cycle.
    pub read_data: u32,
    /// The access completed this cycle; the pipeline must stall when clear.
    pub valid: bool,
    /// Hit or miss of this cycle's request.
    pub access: CacheAccess,
    /// A line fill is in progress.
    pub fetching: bool,
    /// Line fill request to the bus.
    pub read_req: bool,
    /// Line address of the fill.
    pub read_addr: u32,
    /// Write-back request to the bus (data cache only).
    pub write_req: bool,
    /// Line address of the write-back.
    pub write_addr: u32,
    /// Write-back word for the address DRAM last requested.
    pub write_data: u32,
    /// The write-back queue is at capacity.
    pub queue_full: bool,
    /// Pending write-backs.
    pub queue_len: usize,
}

/// Per-cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Cycles on which a request hit.
    pub hits: u64,
    /// Line fills started.
    pub misses: u64,
    /// Cycles a miss waited for its dirty victim to drain.
    pub eviction_waits: u64,
    /// Completed write-backs.
    pub write_backs: u64,
    /// Store hits refused because the write-back queue was full.
    pub write_queue_overflows: u64,
    /// Cycles a store waited for its own line's write-back to finish.
    pub write_back_conflicts: u64,
}

#[derive(Clone, Debug)]
struct WayArray {
    tags: Vec<u32>,
    valid: Vec<bool>,
    data: Vec<u32>,
}

impl WayArray {
    fn new() -> Self {
        Self {
            tags: vec![0; CACHE_SETS],
            valid: vec![false; CACHE_SETS],
            data: vec![0; CACHE_SETS * LINE_WORDS],
        }
    }
}

/// Tag and valid state of one line, for inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LineState {
    /// Stored tag.
    pub tag: u32,
    /// Valid bit.
    pub valid: bool,
}

/// Storage for both ways and the replacement bits.
#[derive(Clone, Debug)]
pub struct CacheArrays {
    ways: [WayArray; 2],
    lru: LastUsed,
}

impl CacheArrays {
    /// Creates arrays with every line invalid.
    pub fn new() -> Self {
        Self {
            ways: [WayArray::new(), WayArray::new()],
            lru: LastUsed::new(),
        }
    }

    /// Compares the tag against both ways.
    ///
    /// # Returns
    ///
    /// The way holding a valid line with a matching tag, if any.
    pub fn lookup(&self, addr: CacheAddr) -> Option<Way> {
        let index = addr.index();
        let tag = addr.tag();
        Way::ALL.into_iter().find(|way| {
            let arr = &self.ways[way.index()];
            arr.valid[index] && arr.tags[index] == tag
        })
    }

    /// Reads the word at `addr` from `way`.
    #[inline]
    pub fn read_word(&self, way: Way, addr: CacheAddr) -> u32 {
        self.ways[way.index()].data[addr.index() * LINE_WORDS + addr.block()]
    }

    /// Overwrites the word at `addr` in `way`.
    #[inline]
    pub fn write_word(&mut self, way: Way, addr: CacheAddr, value: u32) {
        self.ways[way.index()].data[addr.index() * LINE_WORDS + addr.block()] = value;
    }

    /// Merges a byte-masked store into the word at `addr` in `way`.
    pub fn merge_word(&mut self, way: Way, addr: CacheAddr, data: u32, mask: u8) {
        let old = self.read_word(way, addr);
        self.write_word(way, addr, Lsu::merge(old, data, mask));
    }

    /// Clears the valid bit of one line.
    pub fn invalidate(&mut self, way: Way, index: usize) {
        self.ways[way.index()].valid[index] = false;
    }

    /// Marks the line for `addr` valid in `way` and makes it most recently used.
    pub fn install(&mut self, way: Way, addr: CacheAddr) {
        let index = addr.index();
        let arr = &mut self.ways[way.index()];
        arr.tags[index] = addr.tag();
        arr.valid[index] = true;
        self.lru.touch(index, way);
    }

    /// Records a hit on `way` at `index`.
    #[inline]
    pub fn touch(&mut self, way: Way, index: usize) {
        self.lru.touch(index, way);
    }

    /// Returns the replacement victim at `index`.
    #[inline]
    pub fn victim(&self, index: usize) -> Way {
        self.lru.victim(index)
    }

    /// Returns the most recently used way at `index`.
    #[inline]
    pub fn last_used(&self, index: usize) -> Way {
        self.lru.last(index)
    }

    /// Returns the tag and valid bit of one line.
    pub fn line(&self, way: Way, index: usize) -> LineState {
        let arr = &self.ways[way.index()];
        LineState {
            tag: arr.tags[index],
            valid: arr.valid[index],
        }
    }
}

impl Default for CacheArrays {
    fn default() -> Self {
        Self::new()
    }
}

/// Line fill phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum FillState {
    /// No fill in progress.
    #[default]
    Idle,
    /// Fill request asserted, waiting for the bus to acknowledge.
    Requesting {
        /// Target way.
        way: Way,
        /// Line address.
        line: u32,
    },
    /// Words streaming in from DRAM.
    Filling {
        /// Target way.
        way: Way,
        /// Line address.
        line: u32,
    },
}

/// Result of advancing a fill by one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillProgress {
    /// No fill was in progress; the cache may serve its request.
    Idle,
    /// The fill is still running.
    Busy,
    /// The last word arrived and the line was installed this cycle.
    Completed,
}

/// Line fill state machine shared by both caches.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineFill {
    state: FillState,
}

impl LineFill {
    /// Returns the current phase.
    pub const fn state(&self) -> FillState {
        self.state
    }

    /// Begins filling `way` with the line containing `addr`.
    ///
    /// The target line is invalidated immediately; its data is overwritten as words arrive.
    pub fn start(&mut self, way: Way, addr: CacheAddr, arrays: &mut CacheArrays, next: &mut CachePorts) {
        let line = addr.line();
        arrays.invalidate(way, addr.index());
        self.state = FillState::Requesting { way, line };
        next.read_req = true;
        next.read_addr = line;
        next.fetching = true;
    }

    /// Advances the fill by one cycle.
    ///
    /// # Arguments
    ///
    /// * `bus` - Signals forwarded by the arbiter last cycle.
    /// * `arrays` - Cache storage to fill.
    /// * `next` - Output ports being computed; the fill request lines are set here.
    ///
    /// # Returns
    ///
    /// Whether the cache is free to serve its CPU-side request this cycle.
    pub fn step(&mut self, bus: &BusSignals, arrays: &mut CacheArrays, next: &mut CachePorts) -> FillProgress {
        match self.state {
            FillState::Idle => FillProgress::Idle,
            FillState::Requesting { way, line } => {
                if bus.read_ack {
                    self.state = FillState::Filling { way, line };
                } else {
                    next.read_req = true;
                    next.read_addr = line;
                }
                next.fetching = true;
                FillProgress::Busy
            }
            FillState::Filling { way, line } => {
                if bus.data_valid {
                    let word = CacheAddr(line | (bus.addr & !LINE_ADDR_MASK));
                    arrays.write_word(way, word, bus.data);
                }
                if bus.last {
                    arrays.install(way, CacheAddr(line));
                    self.state = FillState::Idle;
                    FillProgress::Completed
                } else {
                    next.fetching = true;
                    FillProgress::Busy
                }
            }
        }
    }
}
