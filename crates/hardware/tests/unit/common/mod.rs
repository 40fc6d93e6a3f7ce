/// Cache and DRAM address fields.
pub mod addr;

/// Startup error messages.
pub mod error;
