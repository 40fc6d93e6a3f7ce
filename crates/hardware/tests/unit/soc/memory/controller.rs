//! DRAM Controller Timing Tests.
//!
//! Drives the controller's request port by hand, one update/commit pair per cycle,
//! and checks row-buffer timing, burst ordering, and the write data lag.

use pretty_assertions::assert_eq;
use rvemu_core::config::{MemoryConfig, RamFill};
use rvemu_core::soc::interconnect::BusSignals;
use rvemu_core::soc::memory::controller::{DramController, DramRequest, DramState};
use rvemu_core::soc::traits::Clocked;

fn dram() -> DramController {
    DramController::new(&MemoryConfig {
        ram_words: 1 << 12,
        fill: RamFill::AddressTagged,
    })
}

fn step(dram: &mut DramController) -> BusSignals {
    dram.update();
    dram.commit();
    *dram.ports()
}

fn read(addr: u32) -> DramRequest {
    DramRequest {
        addr,
        read: true,
        ..DramRequest::default()
    }
}

/// Issues `req` for one cycle, then runs with an idle request until `last`.
/// Returns every committed output, the accepting cycle first.
fn run_transaction(dram: &mut DramController, req: DramRequest) -> Vec<BusSignals> {
    dram.request = req;
    let mut trace = vec![step(dram)];
    dram.request = DramRequest::default();
    while !trace.last().is_some_and(|s| s.last) {
        assert!(trace.len() < 32, "transaction never finished");
        trace.push(step(dram));
    }
    trace
}

/// Runs a write burst, answering each `data_request` two cycles later the way the
/// data cache does through the bus. Word values come from `value_of(addr)`.
fn run_write(dram: &mut DramController, addr: u32, value_of: impl Fn(u32) -> u32) -> Vec<BusSignals> {
    dram.request = DramRequest {
        addr,
        write: true,
        ..DramRequest::default()
    };
    let mut trace = vec![step(dram)];
    dram.request = DramRequest::default();
    while !trace.last().is_some_and(|s| s.last) {
        assert!(trace.len() < 32, "write burst never finished");
        let answered = trace.len().checked_sub(2).map(|i| trace[i]);
        dram.request.write_data = match answered {
            Some(s) if s.data_request => value_of(s.addr),
            _ => 0,
        };
        trace.push(step(dram));
    }
    trace
}

// ══════════════════════════════════════════════════════════
// 1. Read timing
// ══════════════════════════════════════════════════════════

#[test]
fn row_miss_read_finishes_twelve_cycles_after_accept() {
    let mut dram = dram();
    let trace = run_transaction(&mut dram, read(0x100));

    assert_eq!(trace.len(), 13, "accept + 12 cycles");
    assert!(trace[2].read_ack, "row miss acknowledges on the RowDelay cycle");
    assert!(trace.iter().filter(|s| s.read_ack).count() == 1);
    assert!(trace[..5].iter().all(|s| !s.data_valid));
    assert!(trace[5..].iter().all(|s| s.data_valid));
    assert_eq!(dram.state(), DramState::Idle);
}

#[test]
fn row_hit_read_finishes_ten_cycles_after_accept() {
    let mut dram = dram();
    let _ = run_transaction(&mut dram, read(0x100));

    // 0x1E0 shares row 0 with 0x100.
    let trace = run_transaction(&mut dram, read(0x1E0));
    assert_eq!(trace.len(), 11, "accept + 10 cycles");
    assert!(trace[0].read_ack, "row hit acknowledges on the accepting cycle");
    assert_eq!(dram.stats.row_hits, 1);
    assert_eq!(dram.stats.row_misses, 1);
}

#[test]
fn different_row_pays_activation_again() {
    let mut dram = dram();
    let _ = run_transaction(&mut dram, read(0x000));
    assert_eq!(dram.active_row(), Some(0));

    let trace = run_transaction(&mut dram, read(0x800));
    assert_eq!(trace.len(), 13);
    assert_eq!(dram.active_row(), Some(1));
    assert_eq!(dram.stats.row_misses, 2);
}

#[test]
fn read_burst_streams_whole_line_in_order() {
    let mut dram = dram();
    // Low five bits are ignored: the burst starts at the line base.
    let trace = run_transaction(&mut dram, read(0x10C));
    let words: Vec<(u32, u32)> = trace
        .iter()
        .filter(|s| s.data_valid)
        .map(|s| (s.addr, s.data))
        .collect();

    let expected: Vec<(u32, u32)> = (0..8)
        .map(|i| {
            let addr = 0x100 + i * 4;
            (addr, addr | 0x5500_0000)
        })
        .collect();
    assert_eq!(words, expected);
    assert_eq!(dram.stats.reads, 1);
}

#[test]
fn idle_without_request_drives_nothing() {
    let mut dram = dram();
    for _ in 0..5 {
        let s = step(&mut dram);
        assert!(!s.data_valid && !s.data_request && !s.last && !s.read_ack && !s.write_ack);
    }
    assert_eq!(dram.state(), DramState::Idle);
    assert_eq!(dram.active_row(), None);
}

#[test]
fn addresses_wrap_modulo_buffer_size() {
    let mut dram = dram();
    // 4096 words = 16 KiB; 0x4000 aliases 0x0.
    let trace = run_transaction(&mut dram, read(0x4000));
    let first = trace.iter().find(|s| s.data_valid).map(|s| s.data);
    assert_eq!(first, Some(0x5500_0000));
}

// ══════════════════════════════════════════════════════════
// 2. Write bursts
// ══════════════════════════════════════════════════════════

#[test]
fn write_burst_spans_ten_cycles_after_column_access() {
    let mut dram = dram();
    let trace = run_write(&mut dram, 0x200, |a| a ^ 0xFFFF_0000);

    // accept, RowActivate, RowDelay(ack), Cas1, Cas2, WriteBurst(0..=9)
    assert_eq!(trace.len(), 15);
    assert!(trace[2].write_ack);
    assert!(!trace.iter().any(|s| s.read_ack || s.data_valid));

    let requested: Vec<u32> = trace
        .iter()
        .filter(|s| s.data_request)
        .map(|s| s.addr)
        .collect();
    assert_eq!(requested, (0..8).map(|i| 0x200 + i * 4).collect::<Vec<_>>());
    assert_eq!(dram.stats.writes, 1);
}

#[test]
fn write_burst_stores_every_word_of_the_line() {
    let mut dram = dram();
    let _ = run_write(&mut dram, 0x240, |a| 0xC0DE_0000 | a);

    for i in 0..8 {
        let addr = 0x240 + i * 4;
        assert_eq!(dram.buffer().read(addr), 0xC0DE_0000 | addr, "word {i}");
    }
    // Neighbouring lines are untouched.
    assert_eq!(dram.buffer().read(0x23C), 0x5500_023C);
    assert_eq!(dram.buffer().read(0x260), 0x5500_0260);
}

#[test]
fn row_hit_write_acknowledges_on_accept() {
    let mut dram = dram();
    let _ = run_transaction(&mut dram, read(0x300));
    let trace = run_write(&mut dram, 0x320, |a| a);
    assert!(trace[0].write_ack);
    assert_eq!(trace.len(), 13);
}
