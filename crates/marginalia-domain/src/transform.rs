//! Transform module - the vocabulary of the assist pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of assist operation the pipeline supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformKind {
    /// Continue the text in the same style
    Continue,
    /// One or two sentence summary
    Summarize,
    /// Clarity and grammar rewrite
    Enhance,
    /// Translation into a target language
    Translate,
    /// Structured extraction of topics, ideas, action items, dates and entities
    Analyze,
    /// Select the notes relevant to a query
    SemanticSearch,
}

impl TransformKind {
    /// All kinds, in pipeline order
    pub const ALL: [TransformKind; 6] = [
        TransformKind::Continue,
        TransformKind::Summarize,
        TransformKind::Enhance,
        TransformKind::Translate,
        TransformKind::Analyze,
        TransformKind::SemanticSearch,
    ];

    /// Stable lowercase name, used in logs, routes and configuration keys
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Continue => "continue",
            TransformKind::Summarize => "summarize",
            TransformKind::Enhance => "enhance",
            TransformKind::Translate => "translate",
            TransformKind::Analyze => "analyze",
            TransformKind::SemanticSearch => "semantic_search",
        }
    }

    /// Whether blank input is rejected before any inference call
    pub fn requires_content(&self) -> bool {
        matches!(self, TransformKind::Analyze | TransformKind::SemanticSearch)
    }

    /// Whether the operation asks the model for a JSON object
    pub fn is_structured(&self) -> bool {
        matches!(self, TransformKind::Analyze | TransformKind::SemanticSearch)
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One note offered to semantic search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Note identifier, unique within one request
    pub id: String,

    /// Plain-text projection of the note
    pub content: String,
}

impl SearchCandidate {
    /// Create a candidate
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Per-kind operation parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OperationParameters {
    /// Continue, Summarize, Enhance and Analyze take no parameters
    #[default]
    None,

    /// Translate needs a target language
    Translate {
        /// Human-readable language name, e.g. "French"
        target_language: String,
    },

    /// SemanticSearch needs the candidate notes
    Search {
        /// Candidates in caller order
        candidates: Vec<SearchCandidate>,
    },
}

/// A fully parameterized request for the inference endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceCall {
    /// System message
    pub system_instruction: String,

    /// User message
    pub user_content: String,

    /// Output length cap; `None` leaves it to the endpoint
    pub max_output_tokens: Option<u32>,

    /// Sampling temperature in [0, 1]
    pub temperature: f32,

    /// Request strict JSON object output
    pub structured_output: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_analyze_and_search_are_structured() {
        for kind in TransformKind::ALL {
            let expected = matches!(kind, TransformKind::Analyze | TransformKind::SemanticSearch);
            assert_eq!(kind.is_structured(), expected, "{}", kind);
            assert_eq!(kind.requires_content(), expected, "{}", kind);
        }
    }

    #[test]
    fn test_kind_names_are_unique() {
        let mut names: Vec<_> = TransformKind::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TransformKind::ALL.len());
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&TransformKind::SemanticSearch).unwrap(),
            "\"semanticSearch\""
        );
        let kind: TransformKind = serde_json::from_str("\"enhance\"").unwrap();
        assert_eq!(kind, TransformKind::Enhance);
    }
}
