//! AI assist actions
//!
//! Each action checks trivial preconditions, delegates to the Assistant and
//! wraps the result. No error escapes as anything but a `Failure`.

use crate::actions::{lock_store, SharedStore, USER_ID_REQUIRED};
use crate::outcome::OperationOutcome;
use marginalia_assist::Assistant;
use marginalia_domain::{AnalysisResult, InferenceProvider, NoteStore, SearchCandidate};
use marginalia_llm::LlmError;
use tracing::info;

/// Message for blank analyze/search input
pub const CONTENT_EMPTY: &str = "content empty";

/// Continue the text
pub async fn continue_action<P>(assistant: &Assistant<P>, content: &str) -> OperationOutcome<String>
where
    P: InferenceProvider<Error = LlmError>,
{
    OperationOutcome::from_assist(
        assistant.continue_text(content).await,
        "Failed to generate completion",
    )
}

/// Summarize the text
pub async fn summarize_action<P>(assistant: &Assistant<P>, content: &str) -> OperationOutcome<String>
where
    P: InferenceProvider<Error = LlmError>,
{
    OperationOutcome::from_assist(assistant.summarize(content).await, "Failed to generate summary")
}

/// Enhance the text
pub async fn enhance_action<P>(assistant: &Assistant<P>, content: &str) -> OperationOutcome<String>
where
    P: InferenceProvider<Error = LlmError>,
{
    OperationOutcome::from_assist(assistant.enhance(content).await, "Failed to enhance content")
}

/// Translate the text into `target_language`
pub async fn translate_action<P>(
    assistant: &Assistant<P>,
    content: &str,
    target_language: &str,
) -> OperationOutcome<String>
where
    P: InferenceProvider<Error = LlmError>,
{
    if target_language.trim().is_empty() {
        return OperationOutcome::invalid("Target language is required");
    }
    OperationOutcome::from_assist(
        assistant.translate(content, target_language).await,
        "Failed to translate content",
    )
}

/// Analyze the text
pub async fn analyze_action<P>(
    assistant: &Assistant<P>,
    content: &str,
) -> OperationOutcome<AnalysisResult>
where
    P: InferenceProvider<Error = LlmError>,
{
    if content.trim().is_empty() {
        return OperationOutcome::invalid(CONTENT_EMPTY);
    }
    OperationOutcome::from_assist(assistant.analyze(content).await, "Failed to analyze content")
}

/// Search an explicit candidate set
pub async fn semantic_search_action<P>(
    assistant: &Assistant<P>,
    query: &str,
    candidates: Vec<SearchCandidate>,
) -> OperationOutcome<Vec<String>>
where
    P: InferenceProvider<Error = LlmError>,
{
    if query.trim().is_empty() {
        return OperationOutcome::invalid(CONTENT_EMPTY);
    }
    OperationOutcome::from_assist(
        assistant.semantic_search(query, candidates).await,
        "Failed to search notes",
    )
}

/// Search every note of one user
pub async fn search_user_notes_action<P>(
    assistant: &Assistant<P>,
    store: &SharedStore,
    user_id: &str,
    query: &str,
) -> OperationOutcome<Vec<String>>
where
    P: InferenceProvider<Error = LlmError>,
{
    if user_id.trim().is_empty() {
        return OperationOutcome::invalid(USER_ID_REQUIRED);
    }
    if query.trim().is_empty() {
        return OperationOutcome::invalid(CONTENT_EMPTY);
    }

    // The lock is released before the inference call.
    let notes = match lock_store(store).and_then(|s| s.list_notes(user_id)) {
        Ok(notes) => notes,
        Err(e) => return OperationOutcome::from_store_error(e, "Failed to search notes"),
    };

    info!("Searching {} notes for user {}", notes.len(), user_id);
    OperationOutcome::from_assist(
        assistant.search_notes(query, &notes).await,
        "Failed to search notes",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::new_shared_store;
    use crate::outcome::FailureKind;
    use marginalia_assist::AssistConfig;
    use marginalia_domain::{NewNote, TransformKind};
    use marginalia_llm::{MockProvider, MockReply};

    fn assistant(provider: &MockProvider) -> Assistant<MockProvider> {
        Assistant::new(provider.clone(), AssistConfig::default())
    }

    #[tokio::test]
    async fn test_free_text_actions_succeed() {
        let provider = MockProvider::new("model text");
        let assistant = assistant(&provider);

        for outcome in [
            continue_action(&assistant, "a").await,
            summarize_action(&assistant, "a").await,
            enhance_action(&assistant, "a").await,
            translate_action(&assistant, "a", "Italian").await,
        ] {
            assert_eq!(outcome, OperationOutcome::success("model text".to_string()));
        }
    }

    #[tokio::test]
    async fn test_failure_messages_per_action() {
        let provider = MockProvider::failing();
        let assistant = assistant(&provider);

        let cases = [
            (continue_action(&assistant, "a").await, "Failed to generate completion"),
            (summarize_action(&assistant, "a").await, "Failed to generate summary"),
            (enhance_action(&assistant, "a").await, "Failed to enhance content"),
            (translate_action(&assistant, "a", "Dutch").await, "Failed to translate content"),
        ];
        for (outcome, message) in cases {
            assert_eq!(
                outcome,
                OperationOutcome::failure(FailureKind::InferenceUnavailable, message)
            );
        }
    }

    #[tokio::test]
    async fn test_analyze_empty_content_makes_no_call() {
        let provider = MockProvider::new("{}");
        let outcome = analyze_action(&assistant(&provider), "  \n").await;

        assert_eq!(outcome, OperationOutcome::invalid(CONTENT_EMPTY));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_malformed_response() {
        let provider = MockProvider::default()
            .with_reply(TransformKind::Analyze, MockReply::Text("no json here".to_string()));
        let outcome = analyze_action(&assistant(&provider), "note").await;

        assert_eq!(outcome.failure_kind(), Some(FailureKind::MalformedResponse));
        assert_eq!(outcome.message(), Some("Failed to analyze content"));
    }

    #[tokio::test]
    async fn test_search_empty_query_makes_no_call() {
        let provider = MockProvider::new(r#"{"results":[]}"#);
        let outcome = semantic_search_action(
            &assistant(&provider),
            "",
            vec![SearchCandidate::new("id1", "x")],
        )
        .await;

        assert_eq!(outcome.failure_kind(), Some(FailureKind::InputInvalid));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_translate_requires_language() {
        let provider = MockProvider::new("x");
        let outcome = translate_action(&assistant(&provider), "Hello", "").await;

        assert_eq!(outcome.failure_kind(), Some(FailureKind::InputInvalid));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_user_notes() {
        let store = new_shared_store(":memory:").unwrap();
        let note = lock_store(&store)
            .unwrap()
            .create_note(NewNote {
                user_id: "user_1".to_string(),
                title: "Packing list".to_string(),
                content: "<ul><li>passport</li></ul>".to_string(),
            })
            .unwrap();
        let provider = MockProvider::new(format!(r#"{{"results":["{}","made-up"]}}"#, note.id));

        let outcome = search_user_notes_action(&assistant(&provider), &store, "user_1", "travel").await;
        assert_eq!(outcome, OperationOutcome::success(vec![note.id.to_string()]));

        let (_, call) = provider.last_call().unwrap();
        assert!(call.user_content.contains("- passport"));
    }
}
