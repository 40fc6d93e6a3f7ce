//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the RV32I base opcodes, field extraction, and the decoder consumed by the
//! pipeline's Decode stage.
//!
//! # Layout
//!
//! * `opcodes`: Major opcodes and funct3 encodings for the base integer set.
//! * `instruction`: Field extraction, instruction formats, and opcode classes.
//! * `decode`: Immediate extraction and the `decode` entry point.

/// Instruction decoding logic for all RV32I instruction formats.
pub mod decode;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer opcodes and function codes.
pub mod opcodes;

pub use decode::decode;
pub use instruction::{Decoded, Format, InstructionBits, OpClass};
