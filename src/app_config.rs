use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::language_utils;
use crate::timing::repair::RepairMode;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Narration language code (ISO 639-1)
    pub language: String,

    /// Text chunking settings
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Caption timing settings
    #[serde(default)]
    pub timing: TimingConfig,

    /// External aligner settings
    #[serde(default)]
    pub aligner: AlignerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text chunking settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChunkingConfig {
    // @field: Override of the per-language chunk budget
    #[serde(default)]
    pub max_chunk_len: Option<usize>,

    // @field: Abbreviations added to the built-in sentence-split exceptions
    #[serde(default)]
    pub extra_abbreviations: Vec<String>,
}

/// Caption timing settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TimingConfig {
    // @field: Overlap repair strategy
    #[serde(default)]
    pub repair: RepairMode,
}

/// External aligner settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlignerConfig {
    // @field: Program name or path of the alignment tool
    #[serde(default = "default_aligner_program")]
    pub program: String,

    // @field: Arguments inserted before the align/transcribe subcommand
    #[serde(default)]
    pub args: Vec<String>,

    // @field: Seconds to wait for the tool before giving up
    #[serde(default = "default_aligner_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            program: default_aligner_program(),
            args: Vec::new(),
            timeout_secs: default_aligner_timeout_secs(),
        }
    }
}

fn default_aligner_program() -> String {
    // Companion CLI wrapper around stable-ts; any tool honoring the
    // align/transcribe JSON contract works
    "stable-ts-align".to_string()
}

fn default_aligner_timeout_secs() -> u64 {
    // Whisper-class models on CPU can be slow on long narrations
    300
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: "en".to_string(),
            chunking: ChunkingConfig::default(),
            timing: TimingConfig::default(),
            aligner: AlignerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to open config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            anyhow!(
                "Failed to parse config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json).map_err(|e| {
            anyhow!(
                "Failed to write config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Unsupported language is a hard failure, not a degraded mode
        language_utils::ensure_supported(&self.language)?;

        if let Some(max_len) = self.chunking.max_chunk_len {
            if max_len == 0 {
                return Err(anyhow!("chunking.max_chunk_len must be at least 1"));
            }
        }

        if self.aligner.program.trim().is_empty() {
            return Err(anyhow!("aligner.program must not be empty"));
        }

        if self.aligner.timeout_secs == 0 {
            return Err(anyhow!("aligner.timeout_secs must be at least 1"));
        }

        Ok(())
    }

    /// Effective chunk budget: the configured override, or the
    /// per-language default
    pub fn effective_max_chunk_len(&self) -> Result<usize> {
        match self.chunking.max_chunk_len {
            Some(max_len) => Ok(max_len),
            None => language_utils::max_chunk_len(&self.language),
        }
    }
}
