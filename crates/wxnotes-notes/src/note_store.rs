//! Ordered date → note mapping.
//!
//! Iteration follows the order in which each date was first saved. Saving
//! again for a known date replaces the text in place and keeps that position.
//! Entries are never sorted by date.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error("Note text is empty")]
    EmptyNote,
}

/// What a successful save did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Replaced { previous: String },
}

/// Borrowed view of one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEntry<'a> {
    pub date: &'a str,
    pub note: &'a str,
}

impl std::fmt::Display for NoteEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.date, self.note)
    }
}

#[derive(Debug, Default, Clone)]
pub struct NoteStore {
    order: Vec<String>,
    notes: HashMap<String, String>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert `note` under `date`.
    ///
    /// # Errors
    /// Returns `NoteError::EmptyNote` and leaves the store untouched when
    /// `note` is empty.
    pub fn save(&mut self, date: &str, note: &str) -> Result<SaveOutcome, NoteError> {
        if note.is_empty() {
            return Err(NoteError::EmptyNote);
        }

        match self.notes.insert(date.to_string(), note.to_string()) {
            Some(previous) => {
                tracing::debug!(date, "Replaced note");
                Ok(SaveOutcome::Replaced { previous })
            }
            None => {
                self.order.push(date.to_string());
                tracing::debug!(date, "Inserted note");
                Ok(SaveOutcome::Inserted)
            }
        }
    }

    pub fn get(&self, date: &str) -> Option<&str> {
        self.notes.get(date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in first-insertion order.
    pub fn entries(&self) -> impl Iterator<Item = NoteEntry<'_>> {
        self.order.iter().filter_map(move |date| {
            self.notes.get(date).map(|note| NoteEntry {
                date: date.as_str(),
                note: note.as_str(),
            })
        })
    }

    /// Lines for the notes list, `"{date}: {note}"`.
    pub fn display_lines(&self) -> Vec<String> {
        self.entries().map(|entry| entry.to_string()).collect()
    }
}
