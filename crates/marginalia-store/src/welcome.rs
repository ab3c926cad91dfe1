//! The note every new account starts with

use marginalia_domain::NewNote;

/// Title of the welcome note
pub const WELCOME_NOTE_TITLE: &str = "Welcome to Your AI-Powered Notes! 🚀";

/// Markup body of the welcome note
pub const WELCOME_NOTE_CONTENT: &str = r#"<h1>Welcome to Your AI-Powered Notes! 🚀</h1>
<p>This note walks you through the AI tools available in the editor. Try each one on the text below.</p>
<h2>✨ Continue</h2>
<p>Stuck mid-sentence? Continue picks up where you stopped, in your own style. Try it on: "The three most important aspects of productivity are..."</p>
<h2>📄 Summarize</h2>
<p>Get a one or two sentence overview of a long note, handy for meeting notes and research.</p>
<h2>⚡ Enhance</h2>
<p>Enhance tightens your writing:</p>
<ul>
<li>Fixes grammar and spelling</li>
<li>Improves clarity</li>
<li>Keeps your meaning and voice</li>
</ul>
<h2>🌍 Translate</h2>
<p>Translate a note into another language while keeping its formatting.</p>
<h2>🔍 Analyze</h2>
<p>Pull out key topics, main ideas, action items, dates and the people or organizations a note mentions.</p>
<h2>🔎 Smart Search</h2>
<p>Describe what you are looking for in your own words and the most relevant notes come back first.</p>
<h2>Try It Out!</h2>
<p>Write a few sentences below this line and experiment:</p>
<p>___________________________________________</p>
<p>Happy note-taking! 📝</p>"#;

/// The welcome note for one user
pub fn welcome_note(user_id: &str) -> NewNote {
    NewNote {
        user_id: user_id.to_string(),
        title: WELCOME_NOTE_TITLE.to_string(),
        content: WELCOME_NOTE_CONTENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteStore;
    use marginalia_domain::NoteStore;

    #[test]
    fn test_welcome_note_created_once() {
        let mut store = SqliteStore::new(":memory:").unwrap();

        let created = store.ensure_welcome_note("user_1").unwrap();
        assert_eq!(created.unwrap().title, WELCOME_NOTE_TITLE);

        assert!(store.ensure_welcome_note("user_1").unwrap().is_none());
        assert_eq!(store.list_notes("user_1").unwrap().len(), 1);
    }

    #[test]
    fn test_welcome_note_not_recreated_after_delete() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let welcome = store.ensure_welcome_note("user_1").unwrap().unwrap();

        store.delete_note(welcome.id).unwrap();

        assert!(store.ensure_welcome_note("user_1").unwrap().is_none());
        assert!(store.list_notes("user_1").unwrap().is_empty());
    }

    #[test]
    fn test_welcome_note_skipped_for_existing_user() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store
            .create_note(NewNote {
                user_id: "user_2".to_string(),
                title: "Mine".to_string(),
                content: String::new(),
            })
            .unwrap();

        assert!(store.ensure_welcome_note("user_2").unwrap().is_none());
        assert_eq!(store.list_notes("user_2").unwrap().len(), 1);

        // Marked as seen even though no welcome note was created
        let mine = store.list_notes("user_2").unwrap().remove(0);
        store.delete_note(mine.id).unwrap();
        assert!(store.ensure_welcome_note("user_2").unwrap().is_none());
    }

    #[test]
    fn test_welcome_note_mentions_every_tool() {
        for tool in ["Continue", "Summarize", "Enhance", "Translate", "Analyze", "Search"] {
            assert!(WELCOME_NOTE_CONTENT.contains(tool), "{}", tool);
        }
    }
}
