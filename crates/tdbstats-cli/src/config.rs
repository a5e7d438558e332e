//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Environment variables
//! - Command-line arguments (applied by the handlers)

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tdbstats_core::{CollisionPolicy, LoadOptions, TimeoutConfig, TimestampKeying};

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = ".tdbstats.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How databases are read
    pub ingest: IngestConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Export settings
    pub export: ExportConfig,
}

/// Ingestion defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Field separator
    pub separator: String,

    /// Request timeout in seconds for URL sources
    pub timeout_secs: u64,

    pub timestamp_keying: TimestampKeying,

    pub collision_policy: CollisionPolicy,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,

    /// Show a spinner while loading
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no -v flag is given
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the export command writes into
    pub dir: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        let defaults = LoadOptions::default();
        Self {
            separator: defaults.separator,
            timeout_secs: defaults.timeout.request_timeout.as_secs(),
            timestamp_keying: defaults.timestamp_keying,
            collision_policy: defaults.collision_policy,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
            progress: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// On-disk configuration formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "toml, yaml or json".to_string(),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = FileFormat::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config = match format {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations, then
    /// apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(PROJECT_CONFIG_FILE),
            PathBuf::from(".tdbstats.yaml"),
            PathBuf::from(".tdbstats.yml"),
            PathBuf::from(".tdbstats.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let dir = config_dir.join("tdbstats");
            paths.push(dir.join("config.toml"));
            paths.push(dir.join("config.yaml"));
            paths.push(dir.join("config.json"));
        }

        paths
    }

    /// Path of the user-level configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tdbstats").join("config.toml"))
    }

    /// Apply `TDBSTATS_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(separator) = lookup("TDBSTATS_SEPARATOR") {
            self.ingest.separator = separator;
        }
        if let Some(timeout) = lookup("TDBSTATS_TIMEOUT") {
            self.ingest.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::config(format!("TDBSTATS_TIMEOUT must be a number of seconds, got '{}'", timeout))
            })?;
        }
        if let Some(format) = lookup("TDBSTATS_OUTPUT_FORMAT") {
            self.output.format = format;
        }
        if let Some(dir) = lookup("TDBSTATS_EXPORT_DIR") {
            self.export.dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.output_format().is_none() {
            return Err(Error::config(format!(
                "unknown output format '{}'",
                self.output.format
            )));
        }
        self.load_options().validate()?;
        Ok(())
    }

    /// Configured output format
    pub fn output_format(&self) -> Option<OutputFormat> {
        OutputFormat::from_name(&self.output.format)
    }

    /// Load options from the ingest section
    pub fn load_options(&self) -> LoadOptions {
        let timeout = TimeoutConfig::default()
            .with_request_timeout(Duration::from_secs(self.ingest.timeout_secs));
        LoadOptions::default()
            .with_separator(self.ingest.separator.clone())
            .with_timeout(timeout)
            .with_timestamp_keying(self.ingest.timestamp_keying)
            .with_collision_policy(self.ingest.collision_policy)
    }

    /// Serialize in the given format
    pub fn render(&self, format: crate::cli::ConfigFormat) -> Result<String> {
        use crate::cli::ConfigFormat;
        Ok(match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileFormat::of(path)? {
            FileFormat::Toml => toml::to_string_pretty(self)?,
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
