//! Configuration for the assist pipeline

use serde::{Deserialize, Serialize};

/// Configuration for the Assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Maximum input text length (characters); longer input is rejected
    pub max_input_chars: usize,

    /// Maximum candidates sent to semantic search; the rest are dropped
    pub max_search_candidates: usize,

    /// Drop search results whose id is not one of the candidates
    pub enforce_candidate_membership: bool,
}

impl AssistConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be greater than 0".to_string());
        }
        if self.max_search_candidates == 0 {
            return Err("max_search_candidates must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 50_000,
            max_search_candidates: 200,
            enforce_candidate_membership: true,
        }
    }
}
