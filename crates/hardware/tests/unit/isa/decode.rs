//! Decoder Tests.
//!
//! Covers every immediate format, including the S and J encodings whose bit
//! scrambling is easy to get wrong, and the classification of unknown opcodes.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rvemu_core::isa::{Format, OpClass, decode};

use crate::common::builder::instruction::{
    InstructionBuilder, add, addi, auipc, beq, jal, jalr, lui, lw, sub, sw,
};

#[test]
fn r_type_fields() {
    let d = decode(sub(3, 4, 5));
    assert_eq!(d.format, Format::R);
    assert_eq!(d.class(), OpClass::Op);
    assert_eq!((d.rd, d.rs1, d.rs2), (3, 4, 5));
    assert_eq!(d.funct7, 0b010_0000);
    assert_eq!(d.imm, 0);
}

#[rstest]
#[case::addi_pos(addi(1, 2, 2047), 2047)]
#[case::addi_neg(addi(1, 2, -2048), -2048)]
#[case::lw(lw(1, 2, -4), -4)]
#[case::jalr(jalr(1, 2, 12), 12)]
fn i_immediates(#[case] inst: u32, #[case] imm: i32) {
    let d = decode(inst);
    assert_eq!(d.format, Format::I);
    assert_eq!(d.imm, imm as u32);
}

#[rstest]
#[case::small(8)]
#[case::split(0x7E5)]
#[case::negative(-1)]
#[case::min(-2048)]
fn s_immediates(#[case] imm: i32) {
    let d = decode(sw(7, 8, imm));
    assert_eq!(d.format, Format::S);
    assert_eq!(d.imm, imm as u32);
    assert_eq!((d.rs1, d.rs2), (8, 7));
}

#[rstest]
#[case::forward(16)]
#[case::backward(-8)]
#[case::far(4094)]
#[case::min(-4096)]
fn b_immediates(#[case] imm: i32) {
    let d = decode(beq(1, 2, imm));
    assert_eq!(d.format, Format::B);
    assert_eq!(d.imm, imm as u32);
}

#[rstest]
#[case::forward(2048)]
#[case::bit_eleven(0x800)]
#[case::high_bits(0x7_F000)]
#[case::backward(-0x100)]
#[case::min(-(1 << 20))]
fn j_immediates(#[case] imm: i32) {
    let d = decode(jal(1, imm));
    assert_eq!(d.format, Format::J);
    assert_eq!(d.imm, imm as u32);
}

#[test]
fn u_immediates_keep_the_upper_twenty_bits() {
    assert_eq!(decode(lui(1, 0xFFFFF)).imm, 0xFFFF_F000);
    assert_eq!(decode(auipc(1, 1)).imm, 0x1000);
    assert_eq!(decode(lui(1, 0)).class(), OpClass::Lui);
}

#[test]
fn unknown_opcode_is_invalid() {
    let d = decode(0x0000_007F);
    assert_eq!(d.format, Format::Unknown);
    assert_eq!(d.class(), OpClass::Invalid);
    assert_eq!(d.imm, 0);
}

#[test]
fn zero_word_is_invalid() {
    assert_eq!(decode(0).class(), OpClass::Invalid);
}

#[test]
fn builder_round_trips_register_fields() {
    let inst = InstructionBuilder::new().op(0b111, 0, 31, 30, 29).build();
    let d = decode(inst);
    assert_eq!((d.rd, d.rs1, d.rs2, d.funct3), (31, 30, 29, 0b111));
    assert_eq!(decode(add(0, 0, 0)).class(), OpClass::Op);
}

proptest! {
    #[test]
    fn decode_never_panics(word in any::<u32>()) {
        let d = decode(word);
        prop_assert!(d.rd < 32 && d.rs1 < 32 && d.rs2 < 32);
        prop_assert_eq!(d.raw, word);
    }

    #[test]
    fn branch_offsets_are_even(word in any::<u32>()) {
        let d = decode((word & !0x7F) | 0b110_0011);
        prop_assert_eq!(d.imm & 1, 0);
    }
}
