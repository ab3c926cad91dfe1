//! Marginalia Assist
//!
//! The AI assist pipeline: five single-note transformations (continue,
//! summarize, enhance, translate, analyze) and semantic search over a user's
//! notes.
//!
//! # Architecture
//!
//! ```text
//! text + parameters → PromptBuilder → InferenceProvider → parser → typed value
//! ```
//!
//! Each operation is strictly sequential and stateless. Failures are typed as
//! [`AssistError`] at the point they occur; the action boundary maps them to
//! user-facing outcomes.
//!
//! # Example Usage
//!
//! ```no_run
//! use marginalia_assist::{AssistConfig, Assistant};
//! use marginalia_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"keyTopics": ["budget"]}"#);
//! let assistant = Assistant::new(provider, AssistConfig::default());
//!
//! let analysis = assistant.analyze("Q3 budget review with Acme on May 1st").await?;
//! assert_eq!(analysis.key_topics, vec!["budget"]);
//! assert!(analysis.entities.is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assistant;
mod config;
mod error;
pub mod markup;
pub mod parser;
pub mod prompt;


pub use assistant::Assistant;
pub use config::AssistConfig;
pub use error::AssistError;
pub use prompt::PromptBuilder;
