//! Branch Unit Tests.

use rstest::rstest;
use rvemu_core::core::pipeline::signals::BranchOp;
use rvemu_core::core::units::bru::Bru;

const NEG: u32 = (-5i32) as u32;

#[rstest]
#[case::none(BranchOp::None, 1, 1, false)]
#[case::jump(BranchOp::Jump, 1, 2, true)]
#[case::eq(BranchOp::Eq, 4, 4, true)]
#[case::eq_false(BranchOp::Eq, 4, 5, false)]
#[case::ne(BranchOp::Ne, 4, 5, true)]
#[case::lt_signed(BranchOp::Lt, NEG, 1, true)]
#[case::ge_signed(BranchOp::Ge, NEG, 1, false)]
#[case::ge_equal(BranchOp::Ge, 7, 7, true)]
#[case::ltu_unsigned(BranchOp::Ltu, NEG, 1, false)]
#[case::geu_unsigned(BranchOp::Geu, NEG, 1, true)]
fn branch_conditions(#[case] op: BranchOp, #[case] a: u32, #[case] b: u32, #[case] taken: bool) {
    assert_eq!(Bru::taken(op, a, b), taken);
}

#[test]
fn reserved_funct3_never_branches() {
    assert_eq!(BranchOp::from_funct3(0b010), BranchOp::None);
    assert_eq!(BranchOp::from_funct3(0b011), BranchOp::None);
}
