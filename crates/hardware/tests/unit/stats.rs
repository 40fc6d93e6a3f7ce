//! Statistics Report Tests.

use crate::common::builder::instruction::{addi, jal};
use crate::common::harness::TestContext;

#[test]
fn report_gathers_every_component() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1),
        addi(2, 0, 2),
        jal(0, 0), // 0x08: halt
    ]);
    ctx.run_to_halt(0x08, 400);

    let stats = ctx.machine.stats();
    assert_eq!(stats.pipeline, ctx.stats());
    assert_eq!(stats.icache.misses, 1);
    assert_eq!(stats.bus.icache_reads, 1);
    assert_eq!(stats.dram.reads, 1);
    assert_eq!(stats.dram.row_misses, 1);
    assert_eq!(stats.dcache.misses, 0);
}

#[test]
fn ipc_is_bounded_by_one() {
    let mut ctx = TestContext::new().load_program(&[addi(1, 0, 1), jal(0, 0)]);
    ctx.run(500);
    let ipc = ctx.machine.stats().ipc();
    assert!(ipc > 0.0 && ipc <= 1.0, "ipc = {ipc}");
}

#[test]
fn ipc_of_an_idle_machine_is_zero() {
    let ctx = TestContext::new();
    assert!(ctx.machine.stats().ipc().abs() < f64::EPSILON);
}

#[test]
fn stats_serialize_without_host_timing() {
    let ctx = TestContext::new();
    let json = serde_json::to_value(ctx.machine.stats()).unwrap();
    assert!(json.get("pipeline").is_some());
    assert!(json.get("dram").is_some());
    assert!(json.get("start_time").is_none());
}
