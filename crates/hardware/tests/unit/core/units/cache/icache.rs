//! Instruction Cache Tests.
//!
//! Exercises the instruction cache through a full memory system so that fill timing
//! includes the bus arbiter and DRAM.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rvemu_core::common::CacheAddr;
use rvemu_core::core::units::cache::{CacheRequest, FillState, Way};

use crate::common::harness::{icache_access, read_req, test_system};

// ══════════════════════════════════════════════════════════
// 1. Latency
// ══════════════════════════════════════════════════════════

#[test]
fn cold_miss_hits_on_the_cycle_after_install() {
    let mut sys = test_system();
    sys.icache.request = read_req(0x40);

    let mut valid_at = None;
    for t in 0..20 {
        sys.tick();
        if sys.icache.ports().valid {
            valid_at = Some(t);
            break;
        }
    }
    // Request t0, DRAM accept t1, last word t13, install t14, hit t15.
    assert_eq!(valid_at, Some(15));
    assert_eq!(sys.icache.ports().read_data, 0x5500_0040);
}

#[test]
fn populated_line_hits_in_the_same_cycle() {
    let mut sys = test_system();
    let _ = icache_access(&mut sys, read_req(0x80));

    for offset in (0..32).step_by(4) {
        assert_eq!(icache_access(&mut sys, read_req(0x80 + offset)), 1);
        assert_eq!(sys.icache.ports().read_data, 0x5500_0080 + offset);
    }
    assert_eq!(sys.icache.stats.misses, 1);
}

#[test]
fn open_row_shortens_the_next_fill() {
    let mut sys = test_system();
    let first = icache_access(&mut sys, read_req(0x000));
    let second = icache_access(&mut sys, read_req(0x020));
    assert_eq!(first, 16);
    assert_eq!(second, first - 2, "row hit skips the two activation cycles");
}

#[test]
fn no_request_reports_valid() {
    let mut sys = test_system();
    sys.icache.request = CacheRequest::default();
    sys.tick();
    assert!(sys.icache.ports().valid);
    assert!(!sys.icache.ports().read_req);
}

#[test]
fn fill_raises_fetching_until_install() {
    let mut sys = test_system();
    sys.icache.request = read_req(0x100);
    sys.tick();
    assert!(sys.icache.ports().fetching);
    assert!(sys.icache.ports().read_req);
    assert!(matches!(
        sys.icache.fill_state(),
        FillState::Requesting { line: 0x100, .. }
    ));
    while !sys.icache.ports().valid {
        sys.tick();
    }
    assert_eq!(sys.icache.fill_state(), FillState::Idle);
    assert!(!sys.icache.ports().fetching);
}

// ══════════════════════════════════════════════════════════
// 2. Replacement
// ══════════════════════════════════════════════════════════

/// Three lines mapping to set 0: tags 0, 1, 2.
const A: u32 = 0x0000;
const B: u32 = 0x2000;
const C: u32 = 0x4000;

#[test]
fn second_miss_on_an_index_fills_the_other_way() {
    let mut sys = test_system();
    let _ = icache_access(&mut sys, read_req(A));
    let _ = icache_access(&mut sys, read_req(B));

    let arrays = sys.icache.arrays();
    assert_eq!(arrays.lookup(CacheAddr(A)), Some(Way::First));
    assert_eq!(arrays.lookup(CacheAddr(B)), Some(Way::Second));
}

#[test]
fn miss_evicts_the_way_not_used_last() {
    let mut sys = test_system();
    let _ = icache_access(&mut sys, read_req(A));
    let _ = icache_access(&mut sys, read_req(B));
    // Touch A so B becomes the victim.
    assert_eq!(icache_access(&mut sys, read_req(A)), 1);
    let _ = icache_access(&mut sys, read_req(C));

    let arrays = sys.icache.arrays();
    assert_eq!(arrays.lookup(CacheAddr(A)), Some(Way::First));
    assert_eq!(arrays.lookup(CacheAddr(B)), None);
    assert_eq!(arrays.lookup(CacheAddr(C)), Some(Way::Second));
    assert_eq!(arrays.last_used(0), Way::Second);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// After any fetch sequence over a handful of conflicting lines, no set holds the
    /// same tag in both ways, and every completed fetch returns the DRAM word.
    #[test]
    fn replacement_never_duplicates(seq in prop::collection::vec((0u32..4, 0u32..3, 0u32..8), 1..24)) {
        let mut sys = test_system();
        for (tag, set, word) in seq {
            let addr = (tag << 13) | (set << 5) | (word << 2);
            let _ = icache_access(&mut sys, read_req(addr));
            prop_assert_eq!(sys.icache.ports().read_data, addr | 0x5500_0000);

            for index in 0..3 {
                let first = sys.icache.arrays().line(Way::First, index);
                let second = sys.icache.arrays().line(Way::Second, index);
                prop_assert!(!(first.valid && second.valid && first.tag == second.tag));
            }
        }
    }
}
