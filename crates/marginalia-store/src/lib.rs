//! Marginalia Storage Layer
//!
//! Implements the `NoteStore` trait on SQLite.
//!
//! # Examples
//!
//! ```
//! use marginalia_domain::{NewNote, NoteStore};
//! use marginalia_store::SqliteStore;
//!
//! let mut store = SqliteStore::new(":memory:").unwrap();
//! let note = store
//!     .create_note(NewNote {
//!         user_id: "user_1".to_string(),
//!         title: "Groceries".to_string(),
//!         content: "<p>milk</p>".to_string(),
//!     })
//!     .unwrap();
//! assert_eq!(store.list_notes("user_1").unwrap(), vec![note]);
//! ```

#![warn(missing_docs)]

pub mod welcome;

use chrono::{DateTime, Utc};
use marginalia_domain::{NewNote, Note, NoteId, NoteStore, NoteUpdate};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub use welcome::{welcome_note, WELCOME_NOTE_TITLE};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of NoteStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store behind a mutex or give
/// each thread its own instance.
pub struct SqliteStore {
    conn: Connection,
}

const NOTE_COLUMNS: &str = "id, user_id, title, content, created_at, updated_at";

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Convert NoteId to bytes for storage
    fn note_id_to_bytes(id: NoteId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to NoteId
    fn bytes_to_note_id(bytes: &[u8]) -> Result<NoteId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!("Expected 16 bytes for NoteId, got {}", bytes.len()))
        })?;
        Ok(NoteId::from_value(u128::from_be_bytes(arr)))
    }

    fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, StoreError> {
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| StoreError::InvalidData(format!("Timestamp out of range: {}", millis)))
    }

    /// Current time at the precision the store persists
    fn now() -> DateTime<Utc> {
        let millis = Utc::now().timestamp_millis();
        DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
    }

    fn new_note(note: NewNote) -> Note {
        let now = Self::now();
        Note {
            id: NoteId::new(),
            user_id: note.user_id,
            title: note.title,
            content: note.content,
            created_at: now,
            updated_at: now,
        }
    }

    fn insert_note(conn: &Connection, note: &Note) -> Result<(), StoreError> {
        conn.execute(
            "INSERT INTO notes (id, user_id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                Self::note_id_to_bytes(note.id),
                &note.user_id,
                &note.title,
                &note.content,
                note.created_at.timestamp_millis(),
                note.updated_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    /// Give a user the welcome note the first time they are seen
    ///
    /// Runs at most once per user: a user who deletes the welcome note, or
    /// every note, does not get it back. A user who already has notes when
    /// first seen is marked without receiving one.
    ///
    /// Returns the created note, if any.
    pub fn ensure_welcome_note(&mut self, user_id: &str) -> Result<Option<Note>, StoreError> {
        let tx = self.conn.transaction()?;

        let newly_seen = tx.execute(
            "INSERT OR IGNORE INTO welcomed_users (user_id, welcomed_at) VALUES (?1, ?2)",
            params![user_id, Self::now().timestamp_millis()],
        )? == 1;
        if !newly_seen {
            return Ok(None);
        }

        let has_notes: bool = tx.query_row(
            "SELECT EXISTS (SELECT 1 FROM notes WHERE user_id = ?1)",
            params![user_id],
            |row| row.get(0),
        )?;

        let created = if has_notes {
            None
        } else {
            let note = Self::new_note(welcome_note(user_id));
            Self::insert_note(&tx, &note)?;
            Some(note)
        };
        tx.commit()?;

        if created.is_some() {
            info!("Created welcome note for user {}", user_id);
        }
        Ok(created)
    }

    fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
        let conversion = |idx: usize, ty: rusqlite::types::Type, e: StoreError| {
            rusqlite::Error::FromSqlConversionFailure(idx, ty, Box::new(e))
        };

        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_note_id(&id_bytes)
            .map_err(|e| conversion(0, rusqlite::types::Type::Blob, e))?;
        let created_at = Self::millis_to_datetime(row.get(4)?)
            .map_err(|e| conversion(4, rusqlite::types::Type::Integer, e))?;
        let updated_at = Self::millis_to_datetime(row.get(5)?)
            .map_err(|e| conversion(5, rusqlite::types::Type::Integer, e))?;

        Ok(Note {
            id,
            user_id: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            created_at,
            updated_at,
        })
    }
}

impl NoteStore for SqliteStore {
    type Error = StoreError;

    fn create_note(&mut self, note: NewNote) -> Result<Note, Self::Error> {
        let note = Self::new_note(note);

        Self::insert_note(&self.conn, &note)?;

        debug!("Created note {} for user {}", note.id, note.user_id);
        Ok(note)
    }

    fn get_note(&self, id: NoteId) -> Result<Option<Note>, Self::Error> {
        let note = self
            .conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                params![Self::note_id_to_bytes(id)],
                Self::row_to_note,
            )
            .optional()?;

        Ok(note)
    }

    fn list_notes(&self, user_id: &str) -> Result<Vec<Note>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM notes WHERE user_id = ?1 ORDER BY updated_at DESC, id DESC",
            NOTE_COLUMNS
        ))?;

        let notes = stmt
            .query_map(params![user_id], Self::row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    fn update_note(&mut self, id: NoteId, update: NoteUpdate) -> Result<Note, Self::Error> {
        let mut note = self
            .get_note(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(title) = update.title {
            note.title = title;
        }
        if let Some(content) = update.content {
            note.content = content;
        }
        note.updated_at = Self::now();

        self.conn.execute(
            "UPDATE notes SET title = ?2, content = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                Self::note_id_to_bytes(id),
                &note.title,
                &note.content,
                note.updated_at.timestamp_millis(),
            ],
        )?;

        debug!("Updated note {}", id);
        Ok(note)
    }

    fn delete_note(&mut self, id: NoteId) -> Result<(), Self::Error> {
        let deleted = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1",
            params![Self::note_id_to_bytes(id)],
        )?;

        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!("Deleted note {}", id);
        Ok(())
    }
}
