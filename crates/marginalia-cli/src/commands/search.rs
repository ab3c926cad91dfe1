//! Notes file loading for the search command.

use crate::error::{CliError, Result};
use marginalia_assist::markup::note_projection;
use marginalia_domain::{Note, SearchCandidate};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Accepted shapes of a notes file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotesFile {
    /// Full notes as exported by the server
    Notes(Vec<Note>),
    /// Pre-projected candidates
    Candidates(Vec<SearchCandidate>),
}

/// Load search candidates from a JSON file.
///
/// Full notes are projected to plain text the same way stored notes are.
pub fn load_candidates(path: &Path) -> Result<Vec<SearchCandidate>> {
    let contents = fs::read_to_string(path)?;
    parse_candidates(&contents)
}

fn parse_candidates(contents: &str) -> Result<Vec<SearchCandidate>> {
    let file: NotesFile = serde_json::from_str(contents).map_err(|e| {
        CliError::InvalidInput(format!(
            "notes file must be a JSON array of notes or {{id, content}} objects: {}",
            e
        ))
    })?;

    Ok(match file {
        NotesFile::Notes(notes) => notes.iter().map(note_projection).collect(),
        NotesFile::Candidates(candidates) => candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use marginalia_domain::NoteId;

    #[test]
    fn test_parse_plain_candidates() {
        let candidates = parse_candidates(r#"[{"id":"a","content":"x"}]"#).unwrap();
        assert_eq!(candidates, vec![SearchCandidate::new("a", "x")]);
    }

    #[test]
    fn test_parse_full_notes_projects_text() {
        let note = Note {
            id: NoteId::new(),
            user_id: "user_1".to_string(),
            title: "Trip".to_string(),
            content: "<p>Flights to <b>Lisbon</b></p>".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&vec![note.clone()]).unwrap();

        let candidates = parse_candidates(&json).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, note.id.to_string());
        assert!(candidates[0].content.starts_with("Title: Trip"));
        assert!(candidates[0].content.contains("Flights to Lisbon"));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(matches!(
            parse_candidates(r#"{"notes": []}"#),
            Err(CliError::InvalidInput(_))
        ));
    }
}
