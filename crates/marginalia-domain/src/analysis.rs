//! Structured note analysis

use serde::{Deserialize, Serialize};

/// Result of the Analyze operation
///
/// All five categories are always present. A category the model left out or
/// malformed is an empty list, never a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Main subjects the note covers
    pub key_topics: Vec<String>,

    /// Central ideas or arguments
    pub main_ideas: Vec<String>,

    /// Tasks or follow-ups
    pub action_items: Vec<String>,

    /// Dates and deadlines mentioned
    pub dates: Vec<String>,

    /// People, organizations, places and other named entities
    pub entities: Vec<String>,
}

impl AnalysisResult {
    /// Wire names of the five categories, in output order
    pub const FIELDS: [&'static str; 5] =
        ["keyTopics", "mainIdeas", "actionItems", "dates", "entities"];

    /// True when the model found nothing in any category
    pub fn is_empty(&self) -> bool {
        self.key_topics.is_empty()
            && self.main_ideas.is_empty()
            && self.action_items.is_empty()
            && self.dates.is_empty()
            && self.entities.is_empty()
    }

    /// Mutable access to a category by its wire name
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        match name {
            "keyTopics" => Some(&mut self.key_topics),
            "mainIdeas" => Some(&mut self.main_ideas),
            "actionItems" => Some(&mut self.action_items),
            "dates" => Some(&mut self.dates),
            "entities" => Some(&mut self.entities),
            _ => None,
        }
    }
}
