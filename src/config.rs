use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::advice::SessionContext;
use crate::error::FuelRsError;
use crate::export::ReportFormat;
use crate::logging::LogConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging settings
    pub logging: LogConfig,

    /// Report output preferences
    pub output: OutputSettings,
}

/// Report output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when `--format` is not given
    pub format: ReportFormat,

    /// Colored terminal output
    pub color: bool,

    /// Session context used when `--context` is not given
    pub context: SessionContext,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: ReportFormat::Text,
            color: true,
            context: SessionContext::Training,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fuelrs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults.
    ///
    /// A missing file is normal; a file that exists but does not parse is
    /// reported as an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_file(&config_path)
    }

    /// Load configuration for the CLI, reporting failures as a domain error
    pub fn resolve(path: Option<&Path>) -> crate::error::Result<Self> {
        Self::load_or_default(path)
            .map_err(|err| FuelRsError::Configuration(format!("{:#}", err)))
    }

    /// Render the configuration as TOML for display
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration to TOML")
    }
}
