//! Note CRUD actions
//!
//! Every action is scoped to the calling user. A note owned by someone else
//! is reported exactly like a missing one.

use crate::actions::{lock_store, SharedStore};
use crate::outcome::OperationOutcome;
use marginalia_domain::{NewNote, Note, NoteId, NoteStore, NoteUpdate};
use marginalia_store::{SqliteStore, StoreError};
use tracing::info;

/// Message for a missing or blank user id
pub const USER_ID_REQUIRED: &str = "User ID is required";

/// Load a note and check it belongs to `user_id`
fn owned_note(store: &SqliteStore, user_id: &str, id: &str) -> Result<Note, StoreError> {
    let not_found = || StoreError::NotFound(id.to_string());
    let id = NoteId::from_string(id).map_err(|_| not_found())?;

    match store.get_note(id)? {
        Some(note) if note.user_id == user_id => Ok(note),
        _ => Err(not_found()),
    }
}

/// Create a note for `user_id`
pub fn create_note_action(
    store: &SharedStore,
    user_id: &str,
    title: &str,
    content: &str,
) -> OperationOutcome<Note> {
    if user_id.trim().is_empty() {
        return OperationOutcome::invalid(USER_ID_REQUIRED);
    }

    let result = lock_store(store).and_then(|mut s| {
        s.create_note(NewNote {
            user_id: user_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        })
    });

    match result {
        Ok(note) => {
            info!("Created note {} for user {}", note.id, user_id);
            OperationOutcome::success_with_message("Note created successfully", note)
        }
        Err(e) => OperationOutcome::from_store_error(e, "Failed to create note"),
    }
}

/// Fetch one of the user's notes
pub fn get_note_action(store: &SharedStore, user_id: &str, id: &str) -> OperationOutcome<Note> {
    if user_id.trim().is_empty() {
        return OperationOutcome::invalid(USER_ID_REQUIRED);
    }

    match lock_store(store).and_then(|s| owned_note(&s, user_id, id)) {
        Ok(note) => OperationOutcome::success_with_message("Note retrieved successfully", note),
        Err(e) => OperationOutcome::from_store_error(e, "Failed to get note"),
    }
}

/// List the user's notes, most recently updated first
///
/// A user's first listing seeds the welcome note. An empty list is a success.
pub fn list_notes_action(store: &SharedStore, user_id: &str) -> OperationOutcome<Vec<Note>> {
    if user_id.trim().is_empty() {
        return OperationOutcome::invalid(USER_ID_REQUIRED);
    }

    let result = lock_store(store).and_then(|mut s| {
        s.ensure_welcome_note(user_id)?;
        s.list_notes(user_id)
    });

    match result {
        Ok(notes) => OperationOutcome::success_with_message("Notes retrieved successfully", notes),
        Err(e) => OperationOutcome::from_store_error(e, "Failed to get notes"),
    }
}

/// Apply a partial update to one of the user's notes
pub fn update_note_action(
    store: &SharedStore,
    user_id: &str,
    id: &str,
    update: NoteUpdate,
) -> OperationOutcome<Note> {
    if user_id.trim().is_empty() {
        return OperationOutcome::invalid(USER_ID_REQUIRED);
    }

    let result = lock_store(store).and_then(|mut s| {
        let note = owned_note(&s, user_id, id)?;
        s.update_note(note.id, update)
    });

    match result {
        Ok(note) => OperationOutcome::success_with_message("Note updated successfully", note),
        Err(e) => OperationOutcome::from_store_error(e, "Failed to update note"),
    }
}

/// Delete one of the user's notes
pub fn delete_note_action(store: &SharedStore, user_id: &str, id: &str) -> OperationOutcome<()> {
    if user_id.trim().is_empty() {
        return OperationOutcome::invalid(USER_ID_REQUIRED);
    }

    let result = lock_store(store).and_then(|mut s| {
        let note = owned_note(&s, user_id, id)?;
        s.delete_note(note.id)
    });

    match result {
        Ok(()) => {
            info!("Deleted note {} for user {}", id, user_id);
            OperationOutcome::success_with_message("Note deleted successfully", ())
        }
        Err(e) => OperationOutcome::from_store_error(e, "Failed to delete note"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::new_shared_store;
    use crate::outcome::FailureKind;
    use marginalia_store::WELCOME_NOTE_TITLE;

    fn store() -> SharedStore {
        new_shared_store(":memory:").unwrap()
    }

    #[test]
    fn test_create_note() {
        let store = store();
        let outcome = create_note_action(&store, "user_1", "Ideas", "<p>one</p>");

        assert!(outcome.is_success());
        assert_eq!(outcome.message(), Some("Note created successfully"));
        let note = outcome.data().unwrap();
        assert_eq!(note.user_id, "user_1");
        assert_eq!(note.title, "Ideas");
    }

    #[test]
    fn test_blank_user_rejected() {
        let store = store();
        assert_eq!(
            list_notes_action(&store, " "),
            OperationOutcome::invalid(USER_ID_REQUIRED)
        );
        assert_eq!(
            create_note_action(&store, "", "t", "c"),
            OperationOutcome::invalid(USER_ID_REQUIRED)
        );
    }

    #[test]
    fn test_list_creates_welcome_note_once() {
        let store = store();

        let first = list_notes_action(&store, "user_1");
        let notes = first.data().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, WELCOME_NOTE_TITLE);

        let second = list_notes_action(&store, "user_1");
        assert_eq!(second.data().unwrap(), notes);
    }

    #[test]
    fn test_deleted_welcome_note_stays_deleted() {
        let store = store();
        let welcome = list_notes_action(&store, "user_1").data().unwrap()[0].clone();

        assert!(delete_note_action(&store, "user_1", &welcome.id.to_string()).is_success());

        assert_eq!(
            list_notes_action(&store, "user_1"),
            OperationOutcome::success_with_message("Notes retrieved successfully", Vec::new())
        );
    }

    #[test]
    fn test_get_note_of_other_user_is_not_found() {
        let store = store();
        let note = create_note_action(&store, "owner", "Private", "")
            .data()
            .cloned()
            .unwrap();

        let outcome = get_note_action(&store, "intruder", &note.id.to_string());
        assert_eq!(
            outcome,
            OperationOutcome::failure(FailureKind::NotFound, "Note not found")
        );

        let outcome = get_note_action(&store, "owner", &note.id.to_string());
        assert_eq!(outcome.data(), Some(&note));
    }

    #[test]
    fn test_get_note_with_garbage_id() {
        let store = store();
        let outcome = get_note_action(&store, "user_1", "not-an-id");
        assert_eq!(outcome.failure_kind(), Some(FailureKind::NotFound));
    }

    #[test]
    fn test_update_note() {
        let store = store();
        let note = create_note_action(&store, "user_1", "Draft", "<p>v1</p>")
            .data()
            .cloned()
            .unwrap();

        let outcome = update_note_action(
            &store,
            "user_1",
            &note.id.to_string(),
            NoteUpdate {
                title: None,
                content: Some("<p>v2</p>".to_string()),
            },
        );
        assert_eq!(outcome.message(), Some("Note updated successfully"));
        let updated = outcome.data().unwrap();
        assert_eq!(updated.title, "Draft");
        assert_eq!(updated.content, "<p>v2</p>");
    }

    #[test]
    fn test_update_note_of_other_user_leaves_it_untouched() {
        let store = store();
        let note = create_note_action(&store, "owner", "Mine", "<p>keep</p>")
            .data()
            .cloned()
            .unwrap();

        let outcome = update_note_action(
            &store,
            "intruder",
            &note.id.to_string(),
            NoteUpdate {
                title: Some("Hijacked".to_string()),
                content: None,
            },
        );
        assert_eq!(outcome.failure_kind(), Some(FailureKind::NotFound));

        let reread = get_note_action(&store, "owner", &note.id.to_string());
        assert_eq!(reread.data().unwrap().title, "Mine");
    }

    #[test]
    fn test_delete_note() {
        let store = store();
        let note = create_note_action(&store, "user_1", "Temp", "")
            .data()
            .cloned()
            .unwrap();
        let id = note.id.to_string();

        let outcome = delete_note_action(&store, "user_1", &id);
        assert_eq!(
            outcome,
            OperationOutcome::success_with_message("Note deleted successfully", ())
        );

        let again = delete_note_action(&store, "user_1", &id);
        assert_eq!(again.message(), Some("Note not found"));
    }
}
