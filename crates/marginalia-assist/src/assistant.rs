//! Core Assistant implementation

use crate::config::AssistConfig;
use crate::error::AssistError;
use crate::markup::note_projection;
use crate::parser::{parse_analysis, parse_search_results, retain_candidate_ids, validate_text};
use crate::prompt::PromptBuilder;
use marginalia_domain::{
    AnalysisResult, InferenceProvider, Note, OperationParameters, SearchCandidate, TransformKind,
};
use marginalia_llm::LlmError;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the assist operations against one inference provider
///
/// Every operation is build prompt → one inference call → validate. The
/// Assistant holds no per-request state, so it can be shared across
/// concurrent callers.
pub struct Assistant<P> {
    provider: Arc<P>,
    config: AssistConfig,
}

impl<P> Clone for Assistant<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            config: self.config.clone(),
        }
    }
}

impl<P> Assistant<P>
where
    P: InferenceProvider<Error = LlmError>,
{
    /// Create a new Assistant
    pub fn new(provider: P, config: AssistConfig) -> Self {
        Self::from_shared(Arc::new(provider), config)
    }

    /// Create an Assistant over an already shared provider
    pub fn from_shared(provider: Arc<P>, config: AssistConfig) -> Self {
        Self { provider, config }
    }

    /// The configuration in use
    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    /// Continue the text in its own style
    pub async fn continue_text(&self, text: &str) -> Result<String, AssistError> {
        self.free_text(TransformKind::Continue, text, &OperationParameters::None)
            .await
    }

    /// Summarize the text in one or two sentences
    pub async fn summarize(&self, text: &str) -> Result<String, AssistError> {
        self.free_text(TransformKind::Summarize, text, &OperationParameters::None)
            .await
    }

    /// Rewrite the text for clarity and grammar
    pub async fn enhance(&self, text: &str) -> Result<String, AssistError> {
        self.free_text(TransformKind::Enhance, text, &OperationParameters::None)
            .await
    }

    /// Translate the text into `target_language`
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, AssistError> {
        if target_language.trim().is_empty() {
            return Err(AssistError::InputInvalid(
                "target language is required".to_string(),
            ));
        }
        let parameters = OperationParameters::Translate {
            target_language: target_language.to_string(),
        };
        self.free_text(TransformKind::Translate, text, &parameters)
            .await
    }

    /// Extract topics, ideas, action items, dates and entities
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AssistError> {
        let raw = self
            .call(TransformKind::Analyze, text, &OperationParameters::None)
            .await?;
        let result = parse_analysis(&raw)?;

        info!(
            "Analysis complete: {} topics, {} ideas, {} action items, {} dates, {} entities",
            result.key_topics.len(),
            result.main_ideas.len(),
            result.action_items.len(),
            result.dates.len(),
            result.entities.len()
        );
        Ok(result)
    }

    /// Select the candidates relevant to `query`, most relevant first
    ///
    /// With membership enforcement on (the default) every returned id is one of
    /// the candidate ids and appears once.
    pub async fn semantic_search(
        &self,
        query: &str,
        candidates: Vec<SearchCandidate>,
    ) -> Result<Vec<String>, AssistError> {
        require_content(query)?;

        let candidates = self.prepare_candidates(candidates);
        if candidates.is_empty() {
            debug!("No candidates to search, skipping inference");
            return Ok(Vec::new());
        }

        let parameters = OperationParameters::Search { candidates };
        let raw = self
            .call(TransformKind::SemanticSearch, query, &parameters)
            .await?;
        let ids = parse_search_results(&raw)?;

        let ids = match &parameters {
            OperationParameters::Search { candidates } if self.config.enforce_candidate_membership => {
                retain_candidate_ids(ids, candidates)
            }
            _ => ids,
        };

        info!("Search for query of {} chars matched {} notes", query.len(), ids.len());
        Ok(ids)
    }

    /// Search a set of notes, projecting each to plain text first
    pub async fn search_notes(&self, query: &str, notes: &[Note]) -> Result<Vec<String>, AssistError> {
        let candidates = notes.iter().map(note_projection).collect();
        self.semantic_search(query, candidates).await
    }

    async fn free_text(
        &self,
        kind: TransformKind,
        text: &str,
        parameters: &OperationParameters,
    ) -> Result<String, AssistError> {
        let raw = self.call(kind, text, parameters).await?;
        validate_text(raw)
    }

    /// Check preconditions, build the prompt and make the one inference call
    async fn call(
        &self,
        kind: TransformKind,
        text: &str,
        parameters: &OperationParameters,
    ) -> Result<String, AssistError> {
        if kind.requires_content() {
            require_content(text)?;
        }
        let chars = text.chars().count();
        if chars > self.config.max_input_chars {
            return Err(AssistError::InputInvalid(format!(
                "text too long: {} chars (max: {})",
                chars, self.config.max_input_chars
            )));
        }

        let call = PromptBuilder::new(kind, text, parameters).build();
        debug!(
            "Prompt for {}: system {} chars, user {} chars",
            kind,
            call.system_instruction.len(),
            call.user_content.len()
        );

        let started = Instant::now();
        let response = self.provider.infer(kind, &call).await;
        let elapsed_ms = started.elapsed().as_millis();

        match response {
            Ok(raw) => {
                debug!("{} response: {} chars in {} ms", kind, raw.len(), elapsed_ms);
                Ok(raw)
            }
            Err(e) => {
                warn!("{} inference failed after {} ms: {}", kind, elapsed_ms, e);
                Err(e.into())
            }
        }
    }

    /// Drop duplicate ids and cap the candidate count
    fn prepare_candidates(&self, candidates: Vec<SearchCandidate>) -> Vec<SearchCandidate> {
        let total = candidates.len();
        let mut seen = HashSet::new();
        let mut unique: Vec<SearchCandidate> = candidates
            .into_iter()
            .filter(|c| seen.insert(c.id.clone()))
            .collect();

        if unique.len() < total {
            warn!("Ignoring {} duplicate candidate ids", total - unique.len());
        }
        if unique.len() > self.config.max_search_candidates {
            warn!(
                "Truncating {} candidates to {}",
                unique.len(),
                self.config.max_search_candidates
            );
            unique.truncate(self.config.max_search_candidates);
        }
        unique
    }
}

fn require_content(text: &str) -> Result<(), AssistError> {
    if text.trim().is_empty() {
        return Err(AssistError::InputInvalid("content empty".to_string()));
    }
    Ok(())
}
