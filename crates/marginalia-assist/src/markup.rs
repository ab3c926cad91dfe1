//! Plain-text projection of note markup
//!
//! The editor stores notes as HTML-ish markup. The model should reason over
//! text, so every note is reduced to plain text before it enters a prompt.

use marginalia_domain::{Note, SearchCandidate};
use regex::Regex;
use std::sync::LazyLock;

static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|blockquote|pre|tr|ul|ol)\s*>")
        .expect("block break pattern is valid")
});

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<li(\s[^>]*)?>").expect("list item pattern is valid"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("space pattern is valid"));

/// Strip markup from a note body
///
/// Block-level elements become line breaks, list items get a `- ` marker,
/// common entities are decoded and blank lines collapse to one.
///
/// ```
/// use marginalia_assist::markup::strip_markup;
///
/// let text = strip_markup("<h1>Plan</h1><p>Buy <b>milk</b> &amp; eggs</p>");
/// assert_eq!(text, "Plan\nBuy milk & eggs");
/// ```
pub fn strip_markup(html: &str) -> String {
    let text = BLOCK_BREAK.replace_all(html, "\n");
    let text = LIST_ITEM.replace_all(&text, "- ");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = INLINE_SPACE.replace_all(line, " ").trim().to_string();
        if line.is_empty() && lines.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn decode_entities(text: &str) -> String {
    // &amp; last, so "&amp;lt;" stays a literal "&lt;"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Project a note into a search candidate
///
/// The candidate text carries the title, both timestamps and the stripped body.
pub fn note_projection(note: &Note) -> SearchCandidate {
    let content = format!(
        "Title: {}\nCreated: {}\nUpdated: {}\n{}",
        note.title.trim(),
        note.created_at.to_rfc3339(),
        note.updated_at.to_rfc3339(),
        strip_markup(&note.content)
    );
    SearchCandidate::new(note.id.to_string(), content)
}
