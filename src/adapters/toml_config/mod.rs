// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::model::ExtractionStrategy;
use crate::error::{FavcError, FavcResult};

/// Config file picked up from the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "favc.toml";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> FavcResult<Self> {
        match value.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(FavcError::Config(format!(
                "Invalid log format: {}. Valid formats: pretty, json",
                other
            ))),
        }
    }
}

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavcConfig {
    /// Transcoding engine binary
    pub ffmpeg_path: String,
    /// Inspection service binary
    pub ffprobe_path: String,
    /// Strategy tag used when a clip does not name one
    pub default_strategy: String,
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for FavcConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            default_strategy: ExtractionStrategy::DEFAULT_TAG.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl FavcConfig {
    /// Validate values that are only known as strings
    pub fn validate(&self) -> FavcResult<()> {
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(FavcError::Config(format!(
                    "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                    other
                )))
            }
        }

        ExtractionStrategy::parse(&self.default_strategy)
            .map_err(|e| FavcError::Config(e.to_string()))?;

        if self.ffmpeg_path.trim().is_empty() || self.ffprobe_path.trim().is_empty() {
            return Err(FavcError::Config(
                "Engine binary paths cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a TOML document; keys may sit at the top level or under `[favc]`
    pub fn from_toml_str(content: &str) -> FavcResult<FavcConfig> {
        let parsed: toml::Value = toml::from_str(content)
            .map_err(|e| FavcError::Config(format!("Failed to parse TOML config: {}", e)))?;

        let section = parsed.get("favc").cloned().unwrap_or(parsed);

        section
            .try_into::<FavcConfig>()
            .map_err(|e| FavcError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> FavcResult<FavcConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FavcError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Config file to use: explicit path, then the working directory default
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        fallback.exists().then_some(fallback)
    }
}
