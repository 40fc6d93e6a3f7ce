//! Write-back queue for the data cache.
//!
//! Dirty lines are not written back on eviction; a store hit enqueues its line and
//! the queue drains to DRAM in the background. The queue provides:
//! 1. **FIFO order:** Entries drain strictly oldest first.
//! 2. **De-duplication:** A per-way, per-index flag keeps a line from being queued twice
//!    while its write-back is outstanding.
//! 3. **Bounded capacity:** A push into a full queue is refused; the caller stalls.
//!
//! The queue length therefore equals the number of distinct dirty lines not yet flushed.

use std::collections::VecDeque;

use serde::Serialize;

use super::Way;
use crate::common::CacheAddr;
use crate::common::constants::{CACHE_SETS, CACHE_WAYS};

/// A line waiting to be written back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WriteBackEntry {
    /// Line-aligned byte address in DRAM.
    pub line: u32,
    /// Way that holds the dirty data.
    pub way: Way,
}

impl WriteBackEntry {
    /// Returns the set index of the line.
    pub const fn index(&self) -> usize {
        CacheAddr(self.line).index()
    }
}

/// Outcome of offering a line to the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Enqueue {
    /// The line was appended.
    Added,
    /// The line was already pending; nothing changed.
    AlreadyQueued,
    /// The queue is full and the line is not pending.
    Full,
}

/// Bounded FIFO of dirty lines.
#[derive(Clone, Debug)]
pub struct WriteQueue {
    entries: VecDeque<WriteBackEntry>,
    queued: [Vec<bool>; CACHE_WAYS],
    capacity: usize,
}

impl WriteQueue {
    /// Creates an empty queue.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of pending lines (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            queued: [vec![false; CACHE_SETS], vec![false; CACHE_SETS]],
            capacity,
        }
    }

    /// Returns the capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of pending lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if no further line can be accepted.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Returns `true` if the line in `way` at `index` is pending.
    pub fn is_queued(&self, way: Way, index: usize) -> bool {
        self.queued[way.index()][index]
    }

    /// Offers a dirty line to the queue.
    pub fn push(&mut self, entry: WriteBackEntry) -> Enqueue {
        let index = entry.index();
        if self.is_queued(entry.way, index) {
            return Enqueue::AlreadyQueued;
        }
        if self.is_full() {
            return Enqueue::Full;
        }
        self.queued[entry.way.index()][index] = true;
        self.entries.push_back(entry);
        Enqueue::Added
    }

    /// Returns the oldest pending line.
    pub fn front(&self) -> Option<&WriteBackEntry> {
        self.entries.front()
    }

    /// Removes the oldest line once its write-back has completed.
    pub fn pop(&mut self) -> Option<WriteBackEntry> {
        let entry = self.entries.pop_front()?;
        self.queued[entry.way.index()][entry.index()] = false;
        Some(entry)
    }

    /// Iterates pending lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &WriteBackEntry> {
        self.entries.iter()
    }
}
