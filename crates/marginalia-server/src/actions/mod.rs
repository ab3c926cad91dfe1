//! The action boundary
//!
//! Actions are the only entry points callers use. Each one returns an
//! [`OperationOutcome`](crate::outcome::OperationOutcome) and never an error.

pub mod ai;
pub mod notes;

use marginalia_store::{SqliteStore, StoreError};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub use ai::{
    analyze_action, continue_action, enhance_action, search_user_notes_action,
    semantic_search_action, summarize_action, translate_action, CONTENT_EMPTY,
};
pub use notes::{
    create_note_action, delete_note_action, get_note_action, list_notes_action,
    update_note_action, USER_ID_REQUIRED,
};

/// Note store shared between request handlers
///
/// Store calls are short SQLite statements run inline on the
/// async worker. The guard must never be held across an `.await`.
pub type SharedStore = Arc<Mutex<SqliteStore>>;

/// Open a store and wrap it for sharing
pub fn new_shared_store<P: AsRef<Path>>(path: P) -> Result<SharedStore, StoreError> {
    Ok(Arc::new(Mutex::new(SqliteStore::new(path)?)))
}

/// Lock the shared store
///
/// A poisoned lock is reported as a storage failure.
pub fn lock_store(store: &SharedStore) -> Result<MutexGuard<'_, SqliteStore>, StoreError> {
    store
        .lock()
        .map_err(|_| StoreError::InvalidData("Note store lock poisoned".to_string()))
}
