//! OpenAI Provider Implementation
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint.
//!
//! # Features
//!
//! - Explicit construction from [`OpenAiConfig`], no process-wide client
//! - Per-operation model selection
//! - Strict JSON mode (`response_format: json_object`) for structured calls
//! - Transport timeout configured on the HTTP client
//!
//! # Examples
//!
//! ```no_run
//! use marginalia_llm::{OpenAiConfig, OpenAiProvider};
//!
//! let config = OpenAiConfig::from_env().expect("OPENAI_API_KEY must be set");
//! let provider = OpenAiProvider::new(config).expect("valid configuration");
//! ```

use crate::LlmError;
use async_trait::async_trait;
use marginalia_domain::{InferenceCall, InferenceProvider, TransformKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for operations without an override
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Model the summary and enhancement operations were tuned on
pub const LEGACY_CHAT_MODEL: &str = "gpt-3.5-turbo-0125";

/// Default timeout for inference requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Bearer token; never serialized back out
    #[serde(skip_serializing, default)]
    pub api_key: String,

    /// API base URL, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used when no per-kind override exists
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Per-kind model overrides, keyed by `TransformKind::name()`
    #[serde(default = "default_models")]
    pub models: HashMap<String, String>,

    /// Transport timeout per request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_models() -> HashMap<String, String> {
    let mut models = HashMap::new();
    models.insert(TransformKind::Continue.name().to_string(), DEFAULT_MODEL.to_string());
    models.insert(TransformKind::Summarize.name().to_string(), LEGACY_CHAT_MODEL.to_string());
    models.insert(TransformKind::Enhance.name().to_string(), LEGACY_CHAT_MODEL.to_string());
    models
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl OpenAiConfig {
    /// Create a configuration with default endpoint and models
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            default_model: default_model(),
            models: default_models(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `MARGINALIA_MODEL`
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Configuration` when the API key is missing or blank.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                LlmError::Configuration("Missing OPENAI_API_KEY environment variable".to_string())
            })?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("OPENAI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("MARGINALIA_MODEL").filter(|m| !m.trim().is_empty()) {
            config.default_model = model;
        }
        Ok(config)
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model for one kind
    pub fn with_model(mut self, kind: TransformKind, model: impl Into<String>) -> Self {
        self.models.insert(kind.name().to_string(), model.into());
        self
    }

    /// Model used for a kind
    pub fn model_for(&self, kind: TransformKind) -> &str {
        self.models
            .get(kind.name())
            .map(String::as_str)
            .unwrap_or(&self.default_model)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::Configuration("api_key must not be empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(LlmError::Configuration(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(LlmError::Configuration(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Response from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// OpenAI-compatible inference provider
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a provider from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Configuration` if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The configuration this provider was built with
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl InferenceProvider for OpenAiProvider {
    type Error = LlmError;

    async fn infer(
        &self,
        kind: TransformKind,
        call: &InferenceCall,
    ) -> Result<String, Self::Error> {
        let model = self.config.model_for(kind);

        let request = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &call.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &call.user_content,
                },
            ],
            temperature: call.temperature,
            max_tokens: call.max_output_tokens,
            response_format: call.structured_output.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        debug!(
            "Calling {} for {}, prompt length: {}",
            model,
            kind,
            call.user_content.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Unavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Inference endpoint returned {}: {}", status, message);

            return Err(match status {
                reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
                _ => LlmError::Unavailable(format!("HTTP {}: {}", status, message)),
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Unavailable(format!("Failed to parse response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        debug!("Generation complete, response length: {}", content.len());
        Ok(content)
    }
}
