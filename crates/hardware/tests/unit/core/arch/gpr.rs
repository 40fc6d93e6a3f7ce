use rvemu_core::core::arch::gpr::{GPR_COUNT, Gpr};

#[test]
fn x0_is_hardwired_to_zero() {
    let mut regs = Gpr::new();
    regs.write(0, 0xFFFF_FFFF);
    assert_eq!(regs.read(0), 0);
}

#[test]
fn writes_are_visible_to_reads() {
    let mut regs = Gpr::new();
    for i in 1..GPR_COUNT {
        regs.write(i, (i as u32) * 3);
    }
    for i in 1..GPR_COUNT {
        assert_eq!(regs.read(i), (i as u32) * 3);
    }
}

#[test]
fn index_wraps_to_five_bits() {
    let mut regs = Gpr::new();
    regs.write(33, 7);
    assert_eq!(regs.read(1), 7);
}

#[test]
fn snapshot_starts_with_x0() {
    let mut regs = Gpr::new();
    regs.write(31, 0xABCD);
    let snap = regs.snapshot();
    assert_eq!(snap[0], 0);
    assert_eq!(snap[31], 0xABCD);
}
