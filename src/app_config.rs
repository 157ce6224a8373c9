use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::subtitle_model::SubtitleFormat;

/// Application configuration module
/// This module handles loading, validating and saving the converter
/// settings. Values given on the command line override the file.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Target format when none is given on the command line
    #[serde(default = "default_format")]
    pub default_format: SubtitleFormat,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for written files
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Write title/artist/album/author tags where the format supports them
    #[serde(default = "default_true")]
    pub include_metadata: bool,

    /// Replace existing output files
    #[serde(default)]
    pub force_overwrite: bool,

    /// Inserted between the file stem and the extension
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_metadata: true,
            force_overwrite: false,
            file_suffix: default_file_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
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
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_format() -> SubtitleFormat {
    SubtitleFormat::Srt
}

fn default_true() -> bool {
    true
}

fn default_file_suffix() -> String {
    "converted".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let suffix = &self.output.file_suffix;
        if suffix.trim().is_empty() {
            return Err(anyhow!("Output file suffix must not be empty"));
        }
        if suffix.contains(['/', '\\']) {
            return Err(anyhow!("Output file suffix must not contain path separators: {}", suffix));
        }
        Ok(())
    }

    /// Load the configuration file, writing a default one when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_format: default_format(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
