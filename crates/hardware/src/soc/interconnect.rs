//! Front-side bus (FSB) arbiter.
//!
//! This module implements the arbiter that serializes the two L1 caches onto the
//! single DRAM channel. It provides:
//! 1. **Arbitration:** When idle, grants exactly one pending requester by fixed priority:
//!    write-back with a full queue, data read, instruction read, then write-back.
//! 2. **Forwarding:** Routes the winner's request lines to DRAM and DRAM's burst signals
//!    back to the winner only, masked to the signals that requester consumes.
//! 3. **Release:** Returns to idle on DRAM's `last` and re-arbitrates on the next cycle.
//!
//! Losing requesters keep their request asserted and are reconsidered only when the bus
//! is idle. The priority is static: sustained data-side traffic starves instruction fetch.

use serde::Serialize;

use crate::core::units::cache::{CachePorts, DCache, ICache};
use crate::soc::memory::controller::{DramController, DramRequest};

/// Signals driven by DRAM and forwarded to the granted cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BusSignals {
    /// Address of the word being transferred.
    pub addr: u32,
    /// Read data, valid when `data_valid` is set.
    pub data: u32,
    /// A read burst word is on `data`.
    pub data_valid: bool,
    /// DRAM wants the write word at `addr`.
    pub data_request: bool,
    /// Final cycle of the transaction.
    pub last: bool,
    /// Read request accepted.
    pub read_ack: bool,
    /// Write request accepted.
    pub write_ack: bool,
}

impl BusSignals {
    /// The view of DRAM a reading cache is allowed to see.
    const fn for_reader(self) -> Self {
        Self {
            data_request: false,
            write_ack: false,
            ..self
        }
    }

    /// The view of DRAM a write-back is allowed to see.
    const fn for_writer(self) -> Self {
        Self {
            data: 0,
            data_valid: false,
            read_ack: false,
            ..self
        }
    }
}

/// Identity of a bus requester.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Requester {
    /// Instruction cache line fill.
    ICacheRead,
    /// Data cache line fill.
    DCacheRead,
    /// Data cache write-back.
    DCacheWrite,
}

/// Grant counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BusStats {
    /// Grants to instruction cache fills.
    pub icache_reads: u64,
    /// Grants to data cache fills.
    pub dcache_reads: u64,
    /// Grants to write-backs.
    pub dcache_writes: u64,
    /// Write-back grants won through the full-queue priority.
    pub urgent_writes: u64,
    /// Cycles with a transaction in flight.
    pub busy_cycles: u64,
}

/// Front-side bus arbiter.
#[derive(Debug, Default)]
pub struct Bus {
    current: Option<Requester>,
    /// Grant counters.
    pub stats: BusStats,
}

impl Bus {
    /// Creates an idle arbiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the requester currently being serviced.
    pub const fn current(&self) -> Option<Requester> {
        self.current
    }

    /// Picks a winner by fixed priority from committed cache outputs.
    ///
    /// # Arguments
    ///
    /// * `i` - Instruction cache outputs.
    /// * `d` - Data cache outputs.
    ///
    /// # Returns
    ///
    /// The winning requester, or `None` if nobody is requesting.
    pub const fn select(i: &CachePorts, d: &CachePorts) -> Option<Requester> {
        if d.write_req && d.queue_full {
            Some(Requester::DCacheWrite)
        } else if d.read_req {
            Some(Requester::DCacheRead)
        } else if i.read_req {
            Some(Requester::ICacheRead)
        } else if d.write_req {
            Some(Requester::DCacheWrite)
        } else {
            None
        }
    }

    /// Runs one arbiter cycle.
    ///
    /// Must be called after every component has committed its ports. Writes the input
    /// ports of DRAM and both caches for the next cycle.
    ///
    /// # Arguments
    ///
    /// * `icache` - Instruction cache.
    /// * `dcache` - Data cache.
    /// * `dram` - DRAM controller.
    pub fn update(&mut self, icache: &mut ICache, dcache: &mut DCache, dram: &mut DramController) {
        let i = *icache.ports();
        let d = *dcache.ports();
        let response = *dram.ports();

        if self.current.is_none() {
            self.current = Self::select(&i, &d);
            if let Some(winner) = self.current {
                match winner {
                    Requester::ICacheRead => self.stats.icache_reads += 1,
                    Requester::DCacheRead => self.stats.dcache_reads += 1,
                    Requester::DCacheWrite => {
                        self.stats.dcache_writes += 1;
                        if d.queue_full {
                            self.stats.urgent_writes += 1;
                        }
                    }
                }
                tracing::trace!(?winner, "bus grant");
            }
        }

        icache.bus = BusSignals::default();
        dcache.bus = BusSignals::default();
        dram.request = match self.current {
            None => DramRequest::default(),
            Some(Requester::ICacheRead) => {
                icache.bus = response.for_reader();
                DramRequest {
                    addr: i.read_addr,
                    read: i.read_req,
                    ..DramRequest::default()
                }
            }
            Some(Requester::DCacheRead) => {
                dcache.bus = response.for_reader();
                DramRequest {
                    addr: d.read_addr,
                    read: d.read_req,
                    ..DramRequest::default()
                }
            }
            Some(Requester::DCacheWrite) => {
                dcache.bus = response.for_writer();
                DramRequest {
                    addr: d.write_addr,
                    read: false,
                    write: d.write_req,
                    write_data: d.write_data,
                }
            }
        };

        if self.current.is_some() {
            self.stats.busy_cycles += 1;
        }
        if response.last {
            self.current = None;
        }
    }
}
