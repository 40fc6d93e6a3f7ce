/// Address splitting and error messages.
pub mod common;

/// Configuration defaults, parsing, and validation.
pub mod config;


/// Instruction decoding.
pub mod isa;



/// Statistics report.
pub mod stats;
