//! Integration tests for marginalia-store
//!
//! These tests verify the full CRUD cycle for notes.

use marginalia_domain::{NewNote, NoteId, NoteStore, NoteUpdate};
use marginalia_store::{SqliteStore, StoreError};

fn new_note(user_id: &str, title: &str) -> NewNote {
    NewNote {
        user_id: user_id.to_string(),
        title: title.to_string(),
        content: format!("<p>{} body</p>", title),
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_create_and_get_note() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let created = store.create_note(new_note("user_1", "Ideas")).unwrap();
    assert_eq!(created.title, "Ideas");
    assert_eq!(created.created_at, created.updated_at);

    let retrieved = store.get_note(created.id).unwrap();
    assert_eq!(retrieved, Some(created));
}

#[test]
fn test_get_missing_note() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert!(store.get_note(NoteId::new()).unwrap().is_none());
}

#[test]
fn test_list_notes_scoped_to_user() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store.create_note(new_note("user_1", "a")).unwrap();
    store.create_note(new_note("user_1", "b")).unwrap();
    store.create_note(new_note("user_2", "c")).unwrap();

    let notes = store.list_notes("user_1").unwrap();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.user_id == "user_1"));
    assert!(store.list_notes("nobody").unwrap().is_empty());
}

#[test]
fn test_list_notes_most_recently_updated_first() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let first = store.create_note(new_note("user_1", "first")).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = store.create_note(new_note("user_1", "second")).unwrap();

    let titles: Vec<_> = store
        .list_notes("user_1")
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["second", "first"]);

    std::thread::sleep(std::time::Duration::from_millis(5));
    store
        .update_note(
            first.id,
            NoteUpdate {
                title: None,
                content: Some("<p>edited</p>".to_string()),
            },
        )
        .unwrap();

    let ids: Vec<_> = store.list_notes("user_1").unwrap().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn test_partial_update() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let note = store.create_note(new_note("user_1", "Draft")).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(2));
    let updated = store
        .update_note(
            note.id,
            NoteUpdate {
                title: Some("Final".to_string()),
                content: None,
            },
        )
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.content, note.content);
    assert_eq!(updated.created_at, note.created_at);
    assert!(updated.updated_at > note.updated_at);
    assert_eq!(store.get_note(note.id).unwrap(), Some(updated));
}

#[test]
fn test_update_missing_note() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let result = store.update_note(NoteId::new(), NoteUpdate::default());
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn test_delete_note() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let note = store.create_note(new_note("user_1", "Temp")).unwrap();

    store.delete_note(note.id).unwrap();
    assert!(store.get_note(note.id).unwrap().is_none());

    let again = store.delete_note(note.id);
    assert!(matches!(again, Err(StoreError::NotFound(_))));
}

#[test]
fn test_notes_persist_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let note = {
        let mut store = SqliteStore::new(&path).unwrap();
        store.create_note(new_note("user_1", "Durable")).unwrap()
    };

    let reopened = SqliteStore::new(&path).unwrap();
    assert_eq!(reopened.get_note(note.id).unwrap(), Some(note));
}
