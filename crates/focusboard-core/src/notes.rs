//! Quick notes: titled text with free-form tags, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::NoteError;
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Case-insensitive substring match on title, content or any tag.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.content.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
    }
}

/// Split `"work, meeting,,"` into `["work", "meeting"]`.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notes {
    notes: Vec<Note>,
}

impl Notes {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// New note at the front. `tags` is comma-separated.
    pub fn add(&mut self, title: &str, content: &str, tags: &str) -> Result<Event, NoteError> {
        if title.trim().is_empty() {
            return Err(NoteError::EmptyTitle);
        }
        let now = Utc::now();
        let note = Note {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: parse_tags(tags),
            created_at: now,
            updated_at: now,
        };
        let event = Event::NoteAdded {
            id: note.id.clone(),
            title: note.title.clone(),
            at: now,
        };
        self.notes.insert(0, note);
        Ok(event)
    }

    pub fn delete(&mut self, id: &str) -> Result<Event, NoteError> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;
        let note = self.notes.remove(index);
        Ok(Event::NoteDeleted {
            id: note.id,
            at: Utc::now(),
        })
    }

    /// Notes matching `term`, in list order. An empty term matches all.
    pub fn search(&self, term: &str) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.matches(term)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notebook() -> Notes {
        let mut notes = Notes::default();
        notes
            .add("Meeting Notes", "Discuss Q4 planning", "work, meeting")
            .unwrap();
        notes.add("Groceries", "eggs, milk", "home").unwrap();
        notes
    }

    #[test]
    fn add_puts_newest_first_and_splits_tags() {
        let notes = notebook();
        assert_eq!(notes.notes()[0].title, "Groceries");
        assert_eq!(notes.notes()[1].tags, vec!["work", "meeting"]);
    }

    #[test]
    fn add_rejects_blank_title() {
        let mut notes = Notes::default();
        assert_eq!(notes.add("   ", "body", ""), Err(NoteError::EmptyTitle));
        assert!(notes.is_empty());
    }

    #[test]
    fn add_event_names_the_note() {
        let mut notes = Notes::default();
        let event = notes.add("Ideas", "", "").unwrap();
        assert_eq!(event.message(), "Note saved: \"Ideas\"");
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let notes = notebook();
        assert_eq!(notes.search("q4")[0].title, "Meeting Notes");
        assert_eq!(notes.search("MILK")[0].title, "Groceries");
        assert_eq!(notes.search("Meet").len(), 1);
        assert_eq!(notes.search("HOME")[0].title, "Groceries");
        assert_eq!(notes.search("").len(), 2);
        assert!(notes.search("dentist").is_empty());
    }

    #[test]
    fn delete_removes_and_reports_missing() {
        let mut notes = notebook();
        let id = notes.notes()[0].id.clone();
        let event = notes.delete(&id).unwrap();
        assert!(matches!(event, Event::NoteDeleted { .. }));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.delete(&id), Err(NoteError::NotFound(id)));
    }

    #[test]
    fn tags_ignore_empty_entries() {
        assert_eq!(parse_tags(" a ,, b ,"), vec!["a", "b"]);
        assert!(parse_tags("").is_empty());
    }
}
