//! Configuration system for the virtual CPU.
//!
//! This module defines all configuration structures used to parameterize
//! a run. It provides:
//! 1. **Defaults:** Baseline constants (stack capacity, step budget, allocation block).
//! 2. **Structures:** Hierarchical config for general, memory, and execution settings.
//! 3. **Loading:** JSON parsing from strings or files.
//!
//! Every field has a default, so an empty JSON object is a valid configuration.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants.
mod defaults {
    use crate::common::constants;

    /// Number of words reserved for the stack.
    pub const STACK_CAPACITY: usize = constants::DEFAULT_STACK_CAPACITY;

    /// Words added to the memory image per growth step.
    pub const BLOCK_SIZE: usize = constants::BLOCK_SIZE;

    /// Step budget for one `run`.
    pub const MAX_STEPS: u64 = constants::DEFAULT_MAX_STEPS;
}

/// Failure to obtain a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    /// The configuration text is not valid JSON for [`Config`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use tinycpu_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "max_steps": 500 },
///     "memory": { "stack_capacity": 64 },
///     "execution": { "strict_operand_fetch": false }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.max_steps, 500);
/// assert_eq!(config.memory.stack_capacity, 64);
/// assert_eq!(config.memory.block_size, 1024);
/// assert!(!config.execution.strict_operand_fetch);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing and run limits.
    pub general: GeneralConfig,
    /// Memory image layout.
    pub memory: MemoryConfig,
    /// Instruction execution policy.
    pub execution: ExecutionConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// General run settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log every executed instruction at `trace` level.
    pub trace_instructions: bool,
    /// Maximum number of steps for one `run`.
    pub max_steps: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: cfg!(feature = "always-trace"),
            max_steps: defaults::MAX_STEPS,
        }
    }
}

/// Memory image layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Number of words reserved for the stack behind the program.
    pub stack_capacity: usize,
    /// Growth step of the memory image, in words.
    pub block_size: usize,
}

impl MemoryConfig {
    /// Returns the block size, never less than one word.
    pub fn effective_block_size(&self) -> usize {
        self.block_size.max(1)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            stack_capacity: defaults::STACK_CAPACITY,
            block_size: defaults::BLOCK_SIZE,
        }
    }
}

/// Instruction execution policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Require operand words to lie inside the code region.
    ///
    /// When disabled, operands may also be read from the stack region, but
    /// never from outside the memory image.
    pub strict_operand_fetch: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            strict_operand_fetch: true,
        }
    }
}
