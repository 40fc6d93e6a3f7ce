//! Run Loop Tests.
//!
//! Stop conditions are checked around each cycle: the limit before, the kill
//! address after.

use pretty_assertions::assert_eq;
use rvemu_core::{Machine, SimError};
use rvemu_core::sim::StopReason;

use crate::common::builder::instruction::{addi, jal, nop};
use crate::common::harness::{TestContext, test_config};

#[test]
fn cycle_limit_stops_exactly() {
    let mut ctx = TestContext::new().load_program(&[jal(0, 0)]);
    assert_eq!(ctx.machine.run_until(Some(37), None), StopReason::CycleLimit);
    assert_eq!(ctx.machine.cycles(), 37);
}

#[test]
fn zero_limit_runs_nothing() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.machine.run_until(Some(0), Some(0)), StopReason::CycleLimit);
    assert_eq!(ctx.machine.cycles(), 0);
}

#[test]
fn kill_address_is_checked_after_the_cycle() {
    // The PC starts at 0, but the run must advance before it can match.
    let mut ctx = TestContext::new().load_program(&[nop(), nop(), jal(0, 0)]);
    assert_eq!(ctx.run_to(0x04, 200), StopReason::KillAddress);
    assert_eq!(ctx.machine.cpu.pc, 0x04);
    // Cold fetch: 15 stalled cycles plus the hit.
    assert_eq!(ctx.machine.cycles(), 16);
}

#[test]
fn limit_wins_when_kill_is_never_reached() {
    let mut ctx = TestContext::new().load_program(&[jal(0, 0)]);
    assert_eq!(ctx.run_to(0x100, 300), StopReason::CycleLimit);
}

#[test]
fn observer_sees_every_cycle() {
    let mut ctx = TestContext::new().load_program(&[addi(1, 0, 1), jal(0, 0)]);
    let mut seen = Vec::new();
    let stop = ctx
        .machine
        .run_with(Some(50), None, |m| seen.push(m.snapshot().cycle));
    assert_eq!(stop, StopReason::CycleLimit);
    assert_eq!(seen, (1..=50).collect::<Vec<u64>>());
}

#[test]
fn start_pc_comes_from_configuration() {
    let mut config = test_config();
    config.general.start_pc = 0x100;
    let mut machine = Machine::new(&config).unwrap();
    machine.load_words(&[0; 128]).unwrap();
    assert_eq!(machine.cpu.pc, 0x100);
    // Fetch 0x100, then 0x104.
    assert_eq!(machine.run_until(Some(100), Some(0x104)), StopReason::KillAddress);
}

#[test]
fn invalid_configuration_is_refused() {
    let mut config = test_config();
    config.cache.write_queue_depth = 0;
    assert!(Machine::new(&config).is_err());
}

#[test]
fn oversized_ram_is_refused_before_allocation() {
    let mut config = test_config();
    config.memory.ram_words = 1 << 31;
    assert!(matches!(Machine::new(&config), Err(SimError::InvalidConfig(_))));
}
