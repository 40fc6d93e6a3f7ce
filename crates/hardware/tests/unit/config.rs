//! Configuration Tests.

use std::io::Write;

use pretty_assertions::assert_eq;
use rvemu_core::SimError;
use rvemu_core::config::{Config, RamFill, TraceFormat};

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.memory.ram_words, 16 * 1024 * 1024);
    assert_eq!(config.memory.fill, RamFill::AddressTagged);
    assert_eq!(config.cache.write_queue_depth, 32);
    assert_eq!(config.general.trace, TraceFormat::Off);
    assert_eq!(config.general.cycle_limit, None);
    assert_eq!(config.general.kill_address, None);
    assert_eq!(config.general.start_pc, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_object_is_the_default() {
    assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json_str(
        r#"{ "general": { "kill_address": 64 }, "memory": { "fill": "Zero" } }"#,
    )
    .unwrap();
    assert_eq!(config.general.kill_address, Some(64));
    assert_eq!(config.memory.fill, RamFill::Zero);
    assert_eq!(config.memory.ram_words, 16 * 1024 * 1024);
    assert_eq!(config.general.trace, TraceFormat::Off);
}

#[test]
fn serialized_config_parses_back() {
    let mut config = Config::default();
    config.general.trace = TraceFormat::Text;
    config.general.cycle_limit = Some(10);
    config.cache.write_queue_depth = 4;
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json_str(&json).unwrap(), config);
}

#[test]
fn ram_size_must_be_a_power_of_two() {
    let err = Config::from_json_str(r#"{ "memory": { "ram_words": 1000 } }"#).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(ref m) if m.contains("power of two")), "{err}");
}

#[test]
fn ram_must_hold_a_cache_line() {
    let err = Config::from_json_str(r#"{ "memory": { "ram_words": 4 } }"#).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(_)));
}

#[test]
fn ram_must_fit_a_32_bit_address_space() {
    let err = Config::from_json_str(r#"{ "memory": { "ram_words": 2147483648 } }"#).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(ref m) if m.contains("exceed")), "{err}");

    let mut config = Config::default();
    config.memory.ram_words = 1 << 30;
    assert!(config.validate().is_ok());
}

#[test]
fn queue_depth_must_be_positive() {
    let err = Config::from_json_str(r#"{ "cache": { "write_queue_depth": 0 } }"#).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(_)));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(
        Config::from_json_str("{ general: "),
        Err(SimError::InvalidConfig(_))
    ));
}

#[test]
fn file_loading() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "trace": "Json", "cycle_limit": 500 }} }}"#).unwrap();
    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.general.trace, TraceFormat::Json);
    assert_eq!(config.general.cycle_limit, Some(500));
}

#[test]
fn file_parse_error_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let err = Config::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, SimError::ConfigParse { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}
