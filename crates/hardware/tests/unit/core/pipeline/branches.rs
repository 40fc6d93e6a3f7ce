//! Branch Resolution Tests.
//!
//! Branches resolve in Execute with no prediction. These tests pin the visible
//! consequences: the two younger instructions are squashed, Fetch loses one
//! extra cycle, and jumps write their return address.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvemu_core::core::cpu::StallCause;
use rvemu_core::core::pipeline::signals::ControlSignals;
use rvemu_core::sim::StopReason;

use crate::common::builder::instruction::{add, addi, beq, blt, bne, jal, jalr, nop};
use crate::common::harness::TestContext;

#[test]
fn jump_squashes_the_two_younger_instructions() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1), // 0x00
        jal(0, 12),    // 0x04 -> 0x10
        addi(2, 0, 2), // 0x08: in Decode when the jump resolves
        addi(3, 0, 3), // 0x0C: being fetched when the jump resolves
        addi(4, 0, 4), // 0x10
        nop(),
        nop(),
        jal(0, 0), // 0x1C: halt
    ]);

    // The redirect cycle itself.
    assert_eq!(ctx.run_to(0x10, 200), StopReason::KillAddress);
    let cpu = &ctx.machine.cpu;
    assert_eq!(cpu.stats.branches_taken, 1);
    assert!(!cpu.if_id.valid);
    assert_eq!(cpu.id_ex.pc, 0x08);
    assert_eq!(cpu.id_ex.ctrl, ControlSignals::default());
    assert!(cpu.branch_hazard);

    // One cycle with Fetch held.
    ctx.run(1);
    assert_eq!(ctx.machine.cpu.last_stall, StallCause::Control);
    assert_eq!(ctx.machine.cpu.pc, 0x10);
    assert_eq!(ctx.stats().stalls_control, 1);

    // Then the target is fetched.
    ctx.run(1);
    assert!(ctx.machine.cpu.if_id.valid);
    assert_eq!(ctx.machine.cpu.if_id.pc, 0x10);
    assert_eq!(ctx.machine.cpu.pc, 0x14);

    ctx.run_to_halt(0x1C, 400);
    assert_eq!(ctx.get_reg(1), 1);
    assert_eq!(ctx.get_reg(2), 0);
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.get_reg(4), 4);
}

#[test]
fn counted_loop_runs_to_completion() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 5),  // 0x00: counter
        addi(2, 0, 0),  // 0x04: accumulator
        add(2, 2, 1),   // 0x08: loop
        addi(1, 1, -1), // 0x0C
        bne(1, 0, -8),  // 0x10 -> 0x08
        nop(),
        nop(),
        jal(0, 0), // 0x1C: halt
    ]);
    ctx.run_to_halt(0x1C, 2000);

    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.get_reg(2), 15);
    // Four loop iterations plus the halt jump.
    assert_eq!(ctx.stats().branches_taken, 5);
}

#[test]
fn not_taken_branch_falls_through() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1), // 0x00
        beq(1, 0, 8),  // 0x04: not taken
        addi(2, 0, 2), // 0x08
        jal(0, 0),     // 0x0C: halt
    ]);
    ctx.run_to_halt(0x0C, 400);

    assert_eq!(ctx.get_reg(2), 2);
    // Only the halt jump redirected.
    assert_eq!(ctx.stats().branches_taken, 1);
}

#[test]
fn signed_comparison_branches_on_negative_operand() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, -1), // 0x00
        addi(2, 0, 1),  // 0x04
        blt(1, 2, 12),  // 0x08 -> 0x14
        addi(3, 0, 3),  // 0x0C: squashed
        addi(3, 0, 4),  // 0x10: never fetched
        addi(4, 0, 5),  // 0x14
        nop(),
        nop(),
        jal(0, 0), // 0x20: halt
    ]);
    ctx.run_to_halt(0x20, 400);

    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.get_reg(4), 5);
}

#[rstest]
#[case::aligned(0)]
#[case::odd_target_cleared(1)]
fn call_and_return(#[case] ret_offset: i32) {
    let mut ctx = TestContext::new().load_program(&[
        jal(1, 16),             // 0x00: call 0x10
        addi(5, 0, 7),          // 0x04: return lands here
        jal(0, 24),             // 0x08 -> 0x20
        nop(),                  // 0x0C
        addi(6, 0, 9),          // 0x10: callee
        jalr(0, 1, ret_offset), // 0x14: return
        nop(),
        nop(),
        jal(0, 0), // 0x20: halt
    ]);
    ctx.run_to_halt(0x20, 600);

    assert_eq!(ctx.get_reg(1), 4);
    assert_eq!(ctx.get_reg(5), 7);
    assert_eq!(ctx.get_reg(6), 9);
}
