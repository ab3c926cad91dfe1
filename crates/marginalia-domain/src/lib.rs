//! Marginalia Domain Layer
//!
//! This crate contains the domain model shared by every other Marginalia crate:
//! notes as the persistence collaborator stores them, and the transient values
//! that flow through the AI assist pipeline.
//!
//! ## Key Concepts
//!
//! - **Note**: A titled rich-text document owned by one user
//! - **TransformKind**: The six assist operations (continue, summarize, enhance,
//!   translate, analyze, semantic search)
//! - **InferenceCall**: A fully parameterized request to the language model
//! - **AnalysisResult**: The always-complete structured analysis of a note
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations (HTTP inference, SQLite) live in other crates
//! - Every entity of the assist pipeline is built per call and never cached

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod note;
pub mod traits;
pub mod transform;

// Re-exports for convenience
pub use analysis::AnalysisResult;
pub use note::{NewNote, Note, NoteId, NoteUpdate};
pub use traits::{InferenceProvider, NoteStore};
pub use transform::{InferenceCall, OperationParameters, SearchCandidate, TransformKind};
