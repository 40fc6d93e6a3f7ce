//! DDR memory controller state machine.
//!
//! This module models one DRAM channel at burst granularity. It provides:
//! 1. **Row buffer:** One open row; a request to a different row pays a two-cycle
//!    activate (`RowActivate`, `RowDelay`) before the column access.
//! 2. **CAS latency:** Two fixed cycles (`Cas1`, `Cas2`) before the first data word.
//! 3. **Bursts:** Eight words per transaction. Reads stream one word per cycle with
//!    `data_valid`; writes request one word per cycle with `data_request`.
//!
//! Write data arrives `WRITE_DATA_LAG` cycles after it is requested (one cycle for the
//! request to reach the cache, one for the answer to come back), so a write burst
//! spans `BURST_LENGTH + WRITE_DATA_LAG` cycles. Read or write is selected on the cycle
//! the request is acknowledged: the accepting `Idle` cycle on a row hit, or the
//! `RowDelay` cycle on a row miss.
//!
//! The controller has no error states. Addresses wrap modulo the buffer size.

use serde::Serialize;

use crate::common::DramAddr;
use crate::common::constants::{BURST_LENGTH, LINE_ADDR_MASK, WORD_BYTES, WRITE_DATA_LAG};
use crate::config::MemoryConfig;
use crate::soc::interconnect::BusSignals;
use crate::soc::memory::buffer::DramBuffer;
use crate::soc::traits::Clocked;

/// Controller FSM phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum DramState {
    /// Waiting for a request.
    #[default]
    Idle,
    /// Opening a new row.
    RowActivate,
    /// Row activation settling; the request is acknowledged here.
    RowDelay,
    /// First column-access latency cycle.
    Cas1,
    /// Second column-access latency cycle.
    Cas2,
    /// Streaming read word `n` (0..8).
    ReadBurst(u8),
    /// Write burst step `n` (0..10): requests word `n`, stores word `n - 2`.
    WriteBurst(u8),
}

/// Direction of the transaction in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum DramOp {
    /// Burst read into a cache line.
    #[default]
    Read,
    /// Burst write of a dirty cache line.
    Write,
}

/// Request lines driven by the bus arbiter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DramRequest {
    /// Transaction address; the low five bits are ignored.
    pub addr: u32,
    /// Read request.
    pub read: bool,
    /// Write request.
    pub write: bool,
    /// Write data for the word requested two cycles earlier.
    pub write_data: u32,
}

/// DRAM activity counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DramStats {
    /// Completed read bursts.
    pub reads: u64,
    /// Completed write bursts.
    pub writes: u64,
    /// Requests that found their row already open.
    pub row_hits: u64,
    /// Requests that had to activate a row.
    pub row_misses: u64,
}

/// DDR controller with a single open row.
#[derive(Debug)]
pub struct DramController {
    /// Inputs for the current cycle, written by the bus arbiter.
    pub request: DramRequest,
    out: BusSignals,
    next: BusSignals,
    state: DramState,
    op: DramOp,
    base: u32,
    active_row: Option<u32>,
    buffer: DramBuffer,
    /// Activity counters.
    pub stats: DramStats,
}

impl DramController {
    /// Creates a controller over a freshly filled buffer.
    ///
    /// # Arguments
    ///
    /// * `config` - DRAM size and fill pattern.
    ///
    /// # Returns
    ///
    /// An idle controller with no row open.
    pub fn new(config: &MemoryConfig) -> Self {
        Self::with_buffer(DramBuffer::new(config.ram_words, config.fill))
    }

    /// Creates a controller over an existing buffer.
    pub fn with_buffer(buffer: DramBuffer) -> Self {
        Self {
            request: DramRequest::default(),
            out: BusSignals::default(),
            next: BusSignals::default(),
            state: DramState::Idle,
            op: DramOp::Read,
            base: 0,
            active_row: None,
            buffer,
            stats: DramStats::default(),
        }
    }

    /// Returns the committed output signals.
    pub const fn ports(&self) -> &BusSignals {
        &self.out
    }

    /// Returns the current FSM phase.
    pub const fn state(&self) -> DramState {
        self.state
    }

    /// Returns the open row, if any.
    pub const fn active_row(&self) -> Option<u32> {
        self.active_row
    }

    /// Returns the line address of the transaction in flight (stale when idle).
    pub const fn transaction_addr(&self) -> u32 {
        self.base
    }

    /// Returns the backing store.
    pub const fn buffer(&self) -> &DramBuffer {
        &self.buffer
    }

    /// Returns the backing store for image loading and inspection.
    pub const fn buffer_mut(&mut self) -> &mut DramBuffer {
        &mut self.buffer
    }

    fn acknowledge(&self, next: &mut BusSignals) {
        match self.op {
            DramOp::Read => next.read_ack = true,
            DramOp::Write => next.write_ack = true,
        }
    }

    const fn burst_addr(&self, word: u8) -> u32 {
        self.base.wrapping_add(word as u32 * WORD_BYTES)
    }
}

impl Clocked for DramController {
    fn update(&mut self) {
        let mut next = BusSignals {
            addr: self.out.addr,
            ..BusSignals::default()
        };

        self.state = match self.state {
            DramState::Idle => {
                let req = self.request;
                if req.read || req.write {
                    self.op = if req.read { DramOp::Read } else { DramOp::Write };
                    self.base = req.addr & LINE_ADDR_MASK;
                    let row = DramAddr::decode(self.base).row;
                    if self.active_row == Some(row) {
                        self.stats.row_hits += 1;
                        self.acknowledge(&mut next);
                        DramState::Cas1
                    } else {
                        self.stats.row_misses += 1;
                        tracing::trace!(row, addr = self.base, "dram row activate");
                        self.active_row = Some(row);
                        DramState::RowActivate
                    }
                } else {
                    DramState::Idle
                }
            }
            DramState::RowActivate => DramState::RowDelay,
            DramState::RowDelay => {
                self.acknowledge(&mut next);
                DramState::Cas1
            }
            DramState::Cas1 => DramState::Cas2,
            DramState::Cas2 => match self.op {
                DramOp::Read => DramState::ReadBurst(0),
                DramOp::Write => DramState::WriteBurst(0),
            },
            DramState::ReadBurst(word) => {
                let addr = self.burst_addr(word);
                next.addr = addr;
                next.data = self.buffer.read(addr);
                next.data_valid = true;
                if word + 1 == BURST_LENGTH {
                    next.last = true;
                    self.stats.reads += 1;
                    DramState::Idle
                } else {
                    DramState::ReadBurst(word + 1)
                }
            }
            DramState::WriteBurst(step) => {
                if step < BURST_LENGTH {
                    next.addr = self.burst_addr(step);
                    next.data_request = true;
                }
                if step >= WRITE_DATA_LAG {
                    let addr = self.burst_addr(step - WRITE_DATA_LAG);
                    self.buffer.write(addr, self.request.write_data);
                }
                if step + 1 == BURST_LENGTH + WRITE_DATA_LAG {
                    next.last = true;
                    self.stats.writes += 1;
                    DramState::Idle
                } else {
                    DramState::WriteBurst(step + 1)
                }
            }
        };

        self.next = next;
    }

    fn commit(&mut self) {
        self.out = self.next;
    }
}
