//! Configuration management for the CLI.
//!
//! Read from `~/.marginalia/config.toml` when present, or from `--config`.
//! The API key only ever comes from the environment.

use crate::error::{CliError, Result};
use crate::output::OutputFormat;
use marginalia_assist::AssistConfig;
use marginalia_llm::OpenAiConfig;
use marginalia_server::config::InferenceSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Display settings
    #[serde(default)]
    pub settings: Settings,

    /// Assist pipeline limits
    #[serde(default)]
    pub assist: AssistConfig,

    /// Inference overrides
    #[serde(default)]
    pub inference: InferenceSettings,
}

/// Display settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".marginalia").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.assist.validate().map_err(CliError::Config)?;
        config
            .inference
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Provider configuration from the environment plus overrides.
    pub fn openai_config(&self) -> Result<OpenAiConfig> {
        let config = self.inference.apply(OpenAiConfig::from_env()?);
        config.validate()?;
        Ok(config)
    }
}
