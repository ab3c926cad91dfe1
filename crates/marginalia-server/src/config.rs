//! Configuration file parsing for the server.
//!
//! Loads bind settings, the database path, assist limits and optional
//! inference overrides from TOML. The API key only ever comes from the
//! environment.

use marginalia_assist::AssistConfig;
use marginalia_domain::TransformKind;
use marginalia_llm::{LlmError, OpenAiConfig};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Assist pipeline limits
    #[serde(default)]
    pub assist: AssistConfig,

    /// Overrides applied on top of the environment's inference settings
    #[serde(default)]
    pub inference: InferenceSettings,
}

/// Optional inference overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InferenceSettings {
    /// API base URL
    pub base_url: Option<String>,

    /// Model for kinds without their own entry
    pub default_model: Option<String>,

    /// Per-kind models keyed by kind name (e.g., "summarize")
    #[serde(default)]
    pub models: HashMap<String, String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

fn default_database_path() -> String {
    "marginalia.db".to_string()
}

impl InferenceSettings {
    /// Check model keys name real operations and the timeout is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in self.models.keys() {
            if !TransformKind::ALL.iter().any(|k| k.name() == kind) {
                return Err(ConfigError::Invalid(format!(
                    "unknown operation '{}' in [inference.models]",
                    kind
                )));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "inference.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply the overrides to a provider configuration
    pub fn apply(&self, mut config: OpenAiConfig) -> OpenAiConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = &self.default_model {
            config.default_model = model.clone();
        }
        for (kind, model) in &self.models {
            config.models.insert(kind.clone(), model.clone());
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        config
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }
        self.assist.validate().map_err(ConfigError::Invalid)?;
        self.inference.validate()
    }

    /// Provider configuration from the environment plus file overrides
    pub fn openai_config(&self) -> Result<OpenAiConfig, LlmError> {
        let config = self.inference.apply(OpenAiConfig::from_env()?);
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            database_path: ":memory:".to_string(),
            assist: AssistConfig::default(),
            inference: InferenceSettings::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.database_path, ":memory:");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 8080
            database_path = "/var/lib/marginalia/notes.db"

            [assist]
            max_search_candidates = 50
            enforce_candidate_membership = false

            [inference]
            base_url = "http://localhost:11434/v1/"
            timeout_secs = 60

            [inference.models]
            analyze = "gpt-4o"
        "#;

        let config = ServerConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.assist.max_search_candidates, 50);
        assert!(!config.assist.enforce_candidate_membership);
        assert_eq!(config.assist.max_input_chars, AssistConfig::default().max_input_chars);

        let openai = config.inference.apply(OpenAiConfig::new("sk-test"));
        assert_eq!(openai.base_url, "http://localhost:11434/v1");
        assert_eq!(openai.timeout_secs, 60);
        assert_eq!(openai.model_for(TransformKind::Analyze), "gpt-4o");
        assert_eq!(
            openai.model_for(TransformKind::Summarize),
            OpenAiConfig::new("k").model_for(TransformKind::Summarize)
        );
    }

    #[test]
    fn test_database_path_defaults() {
        let config = ServerConfig::from_toml("bind_address = \"127.0.0.1\"\nbind_port = 1\n").unwrap();
        assert_eq!(config.database_path, "marginalia.db");
    }

    #[test]
    fn test_unknown_model_kind_rejected() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 3000

            [inference.models]
            summarise = "gpt-4o"
        "#;
        assert!(matches!(
            ServerConfig::from_toml(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_invalid_assist_limits_rejected() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 3000

            [assist]
            max_input_chars = 0
        "#;
        assert!(matches!(
            ServerConfig::from_toml(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_port_is_parse_error() {
        assert!(matches!(
            ServerConfig::from_toml("bind_address = \"127.0.0.1\""),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_address = \"127.0.0.1\"\nbind_port = 4000").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_port, 4000);

        assert!(matches!(
            ServerConfig::from_file("/nonexistent/marginalia.toml"),
            Err(ConfigError::FileRead(_))
        ));
    }
}
