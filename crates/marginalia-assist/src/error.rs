//! Error taxonomy for the assist pipeline

use marginalia_llm::LlmError;
use thiserror::Error;

/// Errors that can occur while running an assist operation
///
/// Each variant is constructed where the failure happens and converted exactly
/// once, at the action boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssistError {
    /// Caller input rejected before any inference call
    #[error("Invalid input: {0}")]
    InputInvalid(String),

    /// Transport or service failure of the inference endpoint
    #[error("Inference unavailable: {0}")]
    InferenceUnavailable(String),

    /// The endpoint produced no usable content
    #[error("Empty response from inference endpoint")]
    EmptyResponse,

    /// Structured output could not be parsed or had the wrong shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<LlmError> for AssistError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::EmptyResponse => AssistError::EmptyResponse,
            other => AssistError::InferenceUnavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AssistError {
    fn from(e: serde_json::Error) -> Self {
        AssistError::MalformedResponse(format!("JSON parse error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_mapping() {
        assert_eq!(AssistError::from(LlmError::EmptyResponse), AssistError::EmptyResponse);
        assert!(matches!(
            AssistError::from(LlmError::RateLimitExceeded),
            AssistError::InferenceUnavailable(_)
        ));
        assert!(matches!(
            AssistError::from(LlmError::Unavailable("timeout".to_string())),
            AssistError::InferenceUnavailable(msg) if msg.contains("timeout")
        ));
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert!(matches!(AssistError::from(err), AssistError::MalformedResponse(_)));
    }
}
