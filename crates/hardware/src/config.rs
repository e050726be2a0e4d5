//! Configuration system for the emulator core.
//!
//! This module defines the configuration structures used to parameterize the
//! CPU and its memory. It provides:
//! 1. **Defaults:** Baseline constants (RAM size, segment limit, FPU control word).
//! 2. **Structures:** Hierarchical config for general, FPU and memory settings.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; missing fields take the values in [`defaults`].

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the emulator.
pub mod defaults {
    /// Guest RAM size (1 MiB, the real-mode address space).
    pub const RAM_SIZE: usize = 1024 * 1024;

    /// Segment limit loaded into every descriptor at reset (64 KiB segments).
    pub const SEGMENT_LIMIT: u32 = 0xFFFF;

    /// x87 control word after `FINIT`.
    ///
    /// All exceptions masked, 64-bit precision control, round to nearest.
    pub const FPU_CONTROL_WORD: u16 = 0x037F;
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON document is malformed or has mistyped fields.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but describes an unusable machine.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use pcsim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "fpu": { "control_word": 3199 } }"#).unwrap();
/// assert_eq!(config.fpu.control_word, 0x0C7F);
/// assert!(!config.general.trace);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General emulator settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// x87 FPU settings.
    #[serde(default)]
    pub fpu: FpuConfig,
    /// Guest memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.ram_size == 0 {
            return Err(ConfigError::Invalid("memory.ram_size must be non-zero".into()));
        }
        Ok(())
    }
}

/// General emulator settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `tracing` event for every x87 memory operand (address, decoded value).
    #[serde(default)]
    pub trace: bool,
}

/// x87 FPU settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FpuConfig {
    /// Control word loaded at reset; its RC field selects integer-store rounding.
    #[serde(default = "FpuConfig::default_control_word")]
    pub control_word: u16,
}

impl FpuConfig {
    fn default_control_word() -> u16 {
        defaults::FPU_CONTROL_WORD
    }
}

impl Default for FpuConfig {
    fn default() -> Self {
        Self {
            control_word: defaults::FPU_CONTROL_WORD,
        }
    }
}

/// Guest memory settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// RAM size in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,

    /// Limit loaded into every segment descriptor at reset.
    #[serde(default = "MemoryConfig::default_segment_limit")]
    pub segment_limit: u32,
}

impl MemoryConfig {
    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }

    fn default_segment_limit() -> u32 {
        defaults::SEGMENT_LIMIT
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_size: defaults::RAM_SIZE,
            segment_limit: defaults::SEGMENT_LIMIT,
        }
    }
}
