//! The uniform result envelope of every action
//!
//! Callers only ever see an `OperationOutcome`: `{"status":"success","data":...}`
//! or `{"status":"error","message":...,"kind":...}`.

use marginalia_assist::AssistError;
use marginalia_store::StoreError;
use serde::Serialize;
use tracing::error;

/// Failure categories reported across the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// Caller input rejected before any remote call
    InputInvalid,
    /// Inference transport or service failure
    InferenceUnavailable,
    /// Inference endpoint returned no usable content
    EmptyResponse,
    /// Structured output unparseable or wrongly shaped
    MalformedResponse,
    /// Referenced note does not exist for this user
    NotFound,
    /// Persistence failure
    Storage,
}

impl From<&AssistError> for FailureKind {
    fn from(e: &AssistError) -> Self {
        match e {
            AssistError::InputInvalid(_) => FailureKind::InputInvalid,
            AssistError::InferenceUnavailable(_) => FailureKind::InferenceUnavailable,
            AssistError::EmptyResponse => FailureKind::EmptyResponse,
            AssistError::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }
}

impl From<&StoreError> for FailureKind {
    fn from(e: &StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => FailureKind::NotFound,
            StoreError::Database(_) | StoreError::InvalidData(_) => FailureKind::Storage,
        }
    }
}

/// Result envelope returned by every action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OperationOutcome<T> {
    /// The operation succeeded
    Success {
        /// Optional confirmation for the UI
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Operation result
        data: T,
    },
    /// The operation failed; nothing partial is returned
    #[serde(rename = "error")]
    Failure {
        /// Short human-readable message
        message: String,
        /// Failure category
        kind: FailureKind,
    },
}

impl<T> OperationOutcome<T> {
    /// Success without a message
    pub fn success(data: T) -> Self {
        OperationOutcome::Success { message: None, data }
    }

    /// Success with a confirmation message
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        OperationOutcome::Success {
            message: Some(message.into()),
            data,
        }
    }

    /// Failure
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        OperationOutcome::Failure {
            message: message.into(),
            kind,
        }
    }

    /// Input rejected locally
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::failure(FailureKind::InputInvalid, message)
    }

    /// Wrap an assist result; `failure_message` is shown for non-input failures
    ///
    /// Input errors keep their own message since it tells the user what to fix.
    pub fn from_assist(result: Result<T, AssistError>, failure_message: &str) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => {
                error!("{}: {}", failure_message, e);
                let kind = FailureKind::from(&e);
                match e {
                    AssistError::InputInvalid(message) => Self::invalid(message),
                    _ => Self::failure(kind, failure_message),
                }
            }
        }
    }

    /// Wrap a store error
    pub fn from_store_error(e: StoreError, failure_message: &str) -> Self {
        error!("{}: {}", failure_message, e);
        match FailureKind::from(&e) {
            FailureKind::NotFound => Self::failure(FailureKind::NotFound, "Note not found"),
            kind => Self::failure(kind, failure_message),
        }
    }

    /// True for `Success`
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Success { .. })
    }

    /// The data of a success
    pub fn data(&self) -> Option<&T> {
        match self {
            OperationOutcome::Success { data, .. } => Some(data),
            OperationOutcome::Failure { .. } => None,
        }
    }

    /// The failure kind, if this is a failure
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            OperationOutcome::Success { .. } => None,
            OperationOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// The message of either variant
    pub fn message(&self) -> Option<&str> {
        match self {
            OperationOutcome::Success { message, .. } => message.as_deref(),
            OperationOutcome::Failure { message, .. } => Some(message),
        }
    }
}
