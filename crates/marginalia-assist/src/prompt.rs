//! LLM prompt engineering for the assist operations

use marginalia_domain::{InferenceCall, OperationParameters, SearchCandidate, TransformKind};
use serde_json::json;

/// Builds the inference call for one assist operation
///
/// Pure mapping from `(kind, text, parameters)`; performs no validation. The
/// operations check their preconditions before building.
pub struct PromptBuilder<'a> {
    kind: TransformKind,
    text: &'a str,
    parameters: &'a OperationParameters,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(kind: TransformKind, text: &'a str, parameters: &'a OperationParameters) -> Self {
        Self {
            kind,
            text,
            parameters,
        }
    }

    /// Build the complete inference call
    pub fn build(&self) -> InferenceCall {
        let (max_output_tokens, temperature) = generation_settings(self.kind);

        InferenceCall {
            system_instruction: self.system_instruction(),
            user_content: self.user_content(),
            max_output_tokens,
            temperature,
            structured_output: self.kind.is_structured(),
        }
    }

    fn system_instruction(&self) -> String {
        match self.kind {
            TransformKind::Continue => CONTINUE_INSTRUCTIONS.to_string(),
            TransformKind::Summarize => SUMMARIZE_INSTRUCTIONS.to_string(),
            TransformKind::Enhance => ENHANCE_INSTRUCTIONS.to_string(),
            TransformKind::Translate => format!(
                "Translate the following text into {}. Preserve the original formatting, \
                 line breaks, markup and tone. Return only the translation, without notes \
                 or explanations.",
                self.target_language().unwrap_or("the requested language")
            ),
            TransformKind::Analyze => ANALYZE_INSTRUCTIONS.to_string(),
            TransformKind::SemanticSearch => SEARCH_INSTRUCTIONS.to_string(),
        }
    }

    fn user_content(&self) -> String {
        match (self.kind, self.parameters) {
            (TransformKind::SemanticSearch, OperationParameters::Search { candidates }) => {
                search_payload(self.text, candidates)
            }
            (TransformKind::SemanticSearch, _) => search_payload(self.text, &[]),
            _ => self.text.to_string(),
        }
    }

    fn target_language(&self) -> Option<&str> {
        match self.parameters {
            OperationParameters::Translate { target_language }
                if !target_language.trim().is_empty() =>
            {
                Some(target_language.trim())
            }
            _ => None,
        }
    }
}

/// Output cap and temperature per kind
pub fn generation_settings(kind: TransformKind) -> (Option<u32>, f32) {
    match kind {
        TransformKind::Continue => (Some(50), 0.7),
        TransformKind::Summarize => (Some(100), 0.7),
        TransformKind::Enhance => (Some(500), 0.3),
        TransformKind::Translate => (Some(1000), 0.3),
        TransformKind::Analyze => (None, 0.3),
        TransformKind::SemanticSearch => (None, 0.0),
    }
}

/// Serialize the query and candidates as one JSON document
fn search_payload(query: &str, candidates: &[SearchCandidate]) -> String {
    json!({
        "query": query,
        "notes": candidates,
    })
    .to_string()
}

const CONTINUE_INSTRUCTIONS: &str = "Continue the text naturally, maintaining the same style, \
tone, and context. Do not add any meta-commentary or conversational elements.";

const SUMMARIZE_INSTRUCTIONS: &str =
    "Provide a 1-2 sentence summary of the key points. Be extremely concise.";

const ENHANCE_INSTRUCTIONS: &str = "Improve the text's clarity and grammar while being as \
concise as possible. Maintain the original meaning and voice. Focus on essential improvements only.";

const ANALYZE_INSTRUCTIONS: &str = r#"Analyze the following note and extract:
- keyTopics: the main subjects it covers
- mainIdeas: its central ideas or arguments
- actionItems: tasks, to-dos and follow-ups
- dates: dates, deadlines and time references
- entities: people, organizations, places and other named entities

Respond with a single JSON object with exactly these five keys. Each value must be an array of strings.
Use an empty array for any category with nothing to report.

Output format (JSON object only, no additional text):
{"keyTopics": [], "mainIdeas": [], "actionItems": [], "dates": [], "entities": []}"#;

const SEARCH_INSTRUCTIONS: &str = r#"You are the search engine for a user's notes.
The input is a JSON object with a "query" string and a "notes" array; each note has an "id" and its "content".
Select the notes relevant to the query, most relevant first.

Rules:
- Only use ids that appear in the notes array
- Never invent or modify an id
- If no note is relevant, return an empty array

Output format (JSON object only, no additional text):
{"results": ["id", ...]}"#;
