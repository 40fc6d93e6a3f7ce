//! Configuration system for the machine model.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants for RAM size, fill pattern, and write-queue depth.
//! 2. **Structures:** Hierarchical config for general, memory, and cache settings.
//! 3. **Enums:** Trace format and RAM fill pattern.
//! 4. **Validation:** Range checks that turn a bad file into a startup error.
//!
//! Configuration is read from JSON (`Config::from_json_file`) or built with `Config::default()`.
//! Cache geometry (256 sets, 2 ways, 32-byte lines) is fixed and not configurable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{LINE_WORDS, MAX_RAM_WORDS, WRITE_QUEUE_DEPTH};
use crate::common::{Result, SimError};

/// Default configuration constants.
///
/// These values apply whenever a field is omitted from the JSON file.
mod defaults {
    /// Number of 32-bit DRAM words (16 Mi words, 64 MiB).
    pub const RAM_WORDS: usize = 16 * 1024 * 1024;

    /// Program counter at reset.
    pub const START_PC: u32 = 0;

    /// Capacity of the data cache write-back queue.
    pub const WRITE_QUEUE_DEPTH: usize = super::WRITE_QUEUE_DEPTH;
}

/// Root configuration for the machine model.
///
/// # Examples
///
/// ```
/// use rvemu_core::config::{Config, TraceFormat};
///
/// let json = r#"{
///     "general": { "trace": "Json", "cycle_limit": 5000 },
///     "memory": { "ram_words": 65536 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.general.trace, TraceFormat::Json);
/// assert_eq!(config.general.cycle_limit, Some(5000));
/// assert_eq!(config.cache.write_queue_depth, 32);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General run settings (trace, stop conditions, reset PC).
    #[serde(default)]
    pub general: GeneralConfig,
    /// DRAM size and initial contents.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON text; omitted fields take their defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration, or `SimError::InvalidConfig` on a parse or range error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON configuration file.
    ///
    /// # Returns
    ///
    /// The validated configuration, or `SimError::Io`, `SimError::ConfigParse`,
    /// or `SimError::InvalidConfig`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| SimError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the type system cannot express.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration describes a buildable machine.
    pub fn validate(&self) -> Result<()> {
        let words = self.memory.ram_words;
        if !words.is_power_of_two() {
            return Err(SimError::InvalidConfig(format!(
                "memory.ram_words must be a power of two, got {words}"
            )));
        }
        if words < LINE_WORDS {
            return Err(SimError::InvalidConfig(format!(
                "memory.ram_words must hold at least one cache line ({LINE_WORDS} words), got {words}"
            )));
        }
        if words > MAX_RAM_WORDS {
            return Err(SimError::InvalidConfig(format!(
                "memory.ram_words must not exceed {MAX_RAM_WORDS} (4 GiB), got {words}"
            )));
        }
        if self.cache.write_queue_depth == 0 {
            return Err(SimError::InvalidConfig(
                "cache.write_queue_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-cycle trace output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceFormat {
    /// No trace.
    #[default]
    Off,
    /// Human-readable multi-line trace per cycle.
    Text,
    /// One JSON object per cycle.
    Json,
}

/// General run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Trace format written by the driver each cycle.
    #[serde(default)]
    pub trace: TraceFormat,

    /// Stop after this many cycles.
    #[serde(default)]
    pub cycle_limit: Option<u64>,

    /// Stop when the fetch program counter reaches this address.
    #[serde(default)]
    pub kill_address: Option<u32>,

    /// Program counter at reset.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,
}

impl GeneralConfig {
    const fn default_start_pc() -> u32 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: TraceFormat::Off,
            cycle_limit: None,
            kill_address: None,
            start_pc: defaults::START_PC,
        }
    }
}

/// Initial DRAM contents before the image is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RamFill {
    /// Every word is zero.
    Zero,
    /// Word `i` holds `(i << 2) | 0x5500_0000`, so stray reads are recognizable.
    #[default]
    AddressTagged,
}

/// DRAM configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Number of 32-bit words; addresses wrap modulo this size.
    #[serde(default = "MemoryConfig::default_ram_words")]
    pub ram_words: usize,

    /// Pattern written to every word at construction.
    #[serde(default)]
    pub fill: RamFill,
}

impl MemoryConfig {
    const fn default_ram_words() -> usize {
        defaults::RAM_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_words: defaults::RAM_WORDS,
            fill: RamFill::AddressTagged,
        }
    }
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Capacity of the data cache write-back queue.
    #[serde(default = "CacheConfig::default_write_queue_depth")]
    pub write_queue_depth: usize,
}

impl CacheConfig {
    const fn default_write_queue_depth() -> usize {
        defaults::WRITE_QUEUE_DEPTH
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            write_queue_depth: defaults::WRITE_QUEUE_DEPTH,
        }
    }
}
