//! Note module - the documents users author and the assist pipeline reads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unique identifier for a note based on UUIDv7
///
/// UUIDv7 keeps identifiers sortable by creation time, which the store relies on
/// as a tie-breaker when two notes share an `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(u128);

impl NoteId {
    /// Generate a new UUIDv7-based NoteId
    ///
    /// # Examples
    ///
    /// ```
    /// use marginalia_domain::NoteId;
    ///
    /// let id = NoteId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a NoteId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a NoteId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use marginalia_domain::NoteId;
    ///
    /// let id = NoteId::new();
    /// let parsed = NoteId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid note id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for NoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        NoteId::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// A persisted note
///
/// `content` is the editor's markup string; the assist pipeline only ever reads
/// its plain-text projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,

    /// Owner, as supplied by the identity provider
    pub user_id: String,

    /// Note title
    pub title: String,

    /// Rich-text markup body
    pub content: String,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last modified
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    /// Owner of the new note
    pub user_id: String,

    /// Note title
    pub title: String,

    /// Rich-text markup body
    pub content: String,
}

/// Partial update of a note; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    /// Replacement title
    #[serde(default)]
    pub title: Option<String>,

    /// Replacement markup body
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteUpdate {
    /// True when the update would not change anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
