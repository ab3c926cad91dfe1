//! Mock provider for deterministic testing

use crate::LlmError;
use async_trait::async_trait;
use marginalia_domain::{InferenceCall, InferenceProvider, TransformKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// A scripted reply
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail as if the service were unreachable
    Unavailable,
    /// Answer with no generated content
    Empty,
}

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<TransformKind, MockReply>,
    calls: Vec<(TransformKind, InferenceCall)>,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured replies without making any network calls and records
/// every call it receives, so tests can assert how many remote calls an
/// operation made and with which parameters.
///
/// Clones share their script and call log.
///
/// # Examples
///
/// ```
/// use marginalia_domain::TransformKind;
/// use marginalia_llm::{MockProvider, MockReply};
///
/// let provider = MockProvider::new("fallback")
///     .with_reply(TransformKind::Analyze, MockReply::Text("{}".to_string()))
///     .with_reply(TransformKind::Summarize, MockReply::Unavailable);
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a MockProvider returning the same text for every kind
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a MockProvider whose every call fails as unavailable
    pub fn failing() -> Self {
        Self::with_default(MockReply::Unavailable)
    }

    /// Create a MockProvider with an arbitrary default reply
    pub fn with_default(reply: MockReply) -> Self {
        Self {
            default_reply: reply,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Script the reply for one kind
    pub fn with_reply(self, kind: TransformKind, reply: MockReply) -> Self {
        self.set_reply(kind, reply);
        self
    }

    /// Script the reply for one kind on a shared provider
    pub fn set_reply(&self, kind: TransformKind, reply: MockReply) {
        self.lock().replies.insert(kind, reply);
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// The most recent call, if any
    pub fn last_call(&self) -> Option<(TransformKind, InferenceCall)> {
        self.lock().calls.last().cloned()
    }

    /// Every call received, oldest first
    pub fn calls(&self) -> Vec<(TransformKind, InferenceCall)> {
        self.lock().calls.clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test must not poison the script for the others sharing it.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl InferenceProvider for MockProvider {
    type Error = LlmError;

    async fn infer(
        &self,
        kind: TransformKind,
        call: &InferenceCall,
    ) -> Result<String, Self::Error> {
        let reply = {
            let mut state = self.lock();
            state.calls.push((kind, call.clone()));
            state
                .replies
                .get(&kind)
                .cloned()
                .unwrap_or_else(|| self.default_reply.clone())
        };

        match reply {
            MockReply::Text(text) if text.trim().is_empty() => Err(LlmError::EmptyResponse),
            MockReply::Text(text) => Ok(text),
            MockReply::Unavailable => Err(LlmError::Unavailable("Mock error".to_string())),
            MockReply::Empty => Err(LlmError::EmptyResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(text: &str) -> InferenceCall {
        InferenceCall {
            system_instruction: "system".to_string(),
            user_content: text.to_string(),
            max_output_tokens: None,
            temperature: 0.0,
            structured_output: false,
        }
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.infer(TransformKind::Continue, &call("x")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_per_kind_replies() {
        let provider = MockProvider::default()
            .with_reply(TransformKind::Summarize, MockReply::Text("short".to_string()))
            .with_reply(TransformKind::Enhance, MockReply::Unavailable);

        assert_eq!(
            provider.infer(TransformKind::Summarize, &call("a")).await.unwrap(),
            "short"
        );
        assert!(matches!(
            provider.infer(TransformKind::Enhance, &call("a")).await,
            Err(LlmError::Unavailable(_))
        ));
        assert_eq!(
            provider.infer(TransformKind::Continue, &call("a")).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_empty_replies() {
        let provider = MockProvider::new("   ")
            .with_reply(TransformKind::Analyze, MockReply::Empty);

        assert!(matches!(
            provider.infer(TransformKind::Continue, &call("a")).await,
            Err(LlmError::EmptyResponse)
        ));
        assert!(matches!(
            provider.infer(TransformKind::Analyze, &call("a")).await,
            Err(LlmError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_mock_provider_records_calls() {
        let provider = MockProvider::new("ok");
        assert_eq!(provider.call_count(), 0);
        assert!(provider.last_call().is_none());

        provider.infer(TransformKind::Continue, &call("first")).await.unwrap();
        provider.infer(TransformKind::Translate, &call("second")).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        let (kind, last) = provider.last_call().unwrap();
        assert_eq!(kind, TransformKind::Translate);
        assert_eq!(last.user_content, "second");

        provider.reset_calls();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.infer(TransformKind::Continue, &call("x")).await.unwrap();
        provider2.set_reply(TransformKind::Continue, MockReply::Unavailable);

        assert_eq!(provider2.call_count(), 1);
        assert!(provider1.infer(TransformKind::Continue, &call("x")).await.is_err());
    }
}
