//! Marginalia LLM Provider Layer
//!
//! Implementations of the `InferenceProvider` trait from `marginalia-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic scripted provider for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions over HTTP
//!
//! A provider executes exactly one request per call. There is no retry policy
//! and no response cache at this layer; timeouts belong to the HTTP transport.
//!
//! # Examples
//!
//! ```
//! use marginalia_domain::{InferenceCall, InferenceProvider, TransformKind};
//! use marginalia_llm::MockProvider;
//!
//! # async fn example() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let call = InferenceCall {
//!     system_instruction: "Be brief.".to_string(),
//!     user_content: "Say hello".to_string(),
//!     max_output_tokens: Some(50),
//!     temperature: 0.7,
//!     structured_output: false,
//! };
//! let result = provider.infer(TransformKind::Continue, &call).await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! assert_eq!(provider.call_count(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod mock;
pub mod openai;

use thiserror::Error;

pub use mock::{MockProvider, MockReply};
pub use openai::{OpenAiConfig, OpenAiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Provider could not be constructed (missing key, bad URL, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network or API communication error
    #[error("Inference service unavailable: {0}")]
    Unavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The service answered but generated no content
    #[error("Inference service returned an empty response")]
    EmptyResponse,
}

impl LlmError {
    /// True when the service answered without usable content
    pub fn is_empty_response(&self) -> bool {
        matches!(self, LlmError::EmptyResponse)
    }
}
