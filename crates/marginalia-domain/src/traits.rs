//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{InferenceCall, NewNote, Note, NoteId, NoteUpdate, TransformKind};
use async_trait::async_trait;

/// Trait for the language-model inference endpoint
///
/// Implemented by the infrastructure layer (marginalia-llm)
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Error type for inference operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute exactly one inference call and return the generated text
    ///
    /// `kind` lets a provider choose its model; the call itself carries every
    /// generation parameter.
    async fn infer(&self, kind: TransformKind, call: &InferenceCall)
        -> Result<String, Self::Error>;
}

/// Trait for storing and retrieving notes
///
/// Implemented by the infrastructure layer (marginalia-store)
pub trait NoteStore {
    /// Error type for store operations
    type Error;

    /// Persist a new note and return it with its id and timestamps
    fn create_note(&mut self, note: NewNote) -> Result<Note, Self::Error>;

    /// Get a note by id
    fn get_note(&self, id: NoteId) -> Result<Option<Note>, Self::Error>;

    /// All notes of one user, most recently updated first
    fn list_notes(&self, user_id: &str) -> Result<Vec<Note>, Self::Error>;

    /// Apply a partial update and return the updated note
    fn update_note(&mut self, id: NoteId, update: NoteUpdate) -> Result<Note, Self::Error>;

    /// Delete a note
    fn delete_note(&mut self, id: NoteId) -> Result<(), Self::Error>;
}
