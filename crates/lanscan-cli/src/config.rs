//! Configuration loading and validation

use lanscan_core::{Dialect, PatternError, PatternSet, PatternSource};
use lanscan_discovery::command::DEFAULT_PING_COUNT;
use lanscan_discovery::ScannerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Refusing to overwrite existing configuration at {0}")]
    AlreadyExists(PathBuf),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Output patterns; the dialect's built-in set when the section is absent
    #[serde(default, rename = "Patterns", skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Utility flavor (linux or bsd)
    #[serde(default)]
    pub dialect: Dialect,
    /// Echo requests sent to the broadcast address
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,
    /// Per-command timeout in seconds (0 to disable)
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            ping_count: default_ping_count(),
            command_timeout_secs: default_command_timeout(),
        }
    }
}

fn default_ping_count() -> u32 {
    DEFAULT_PING_COUNT
}

fn default_command_timeout() -> u64 {
    30
}

impl Config {
    /// Convert to ScannerConfig
    pub fn to_scanner_config(&self) -> Result<ScannerConfig, ConfigError> {
        if self.probe.ping_count == 0 {
            return Err(ConfigError::Invalid(
                "probe.ping_count must be at least 1".to_string(),
            ));
        }

        Ok(ScannerConfig {
            dialect: self.probe.dialect,
            ping_count: self.probe.ping_count,
            command_timeout: match self.probe.command_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        })
    }

    /// Compile the configured patterns, or the dialect's built-in ones
    pub fn pattern_set(&self) -> Result<PatternSet, PatternError> {
        match &self.patterns {
            Some(source) => PatternSet::compile(source),
            None => PatternSet::for_dialect(self.probe.dialect),
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

/// Save default configuration to file, spelling out the built-in patterns
pub fn save_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    let probe = ProbeConfig::default();
    let config = Config {
        patterns: Some(probe.dialect.patterns()),
        probe,
    };

    let content = toml::to_string_pretty(&config)?;
    std::fs::write(path, content)?;
    Ok(())
}
