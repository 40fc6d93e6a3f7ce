use std::io;
use std::path::PathBuf;

use rvemu_core::SimError;

#[test]
fn io_error_names_the_path() {
    let err = SimError::Io {
        path: PathBuf::from("prog.bin"),
        source: io::Error::new(io::ErrorKind::NotFound, "missing"),
    };
    let msg = err.to_string();
    assert!(msg.contains("prog.bin"), "{msg}");
    assert!(msg.contains("missing"), "{msg}");
}

#[test]
fn image_too_large_reports_both_sizes() {
    let err = SimError::ImageTooLarge {
        size: 300,
        capacity: 256,
    };
    assert_eq!(err.to_string(), "image is 300 bytes but DRAM holds only 256 bytes");
}

#[test]
fn invalid_config_carries_its_reason() {
    let err = SimError::InvalidConfig("bad depth".to_owned());
    assert_eq!(err.to_string(), "invalid configuration: bad depth");
}
