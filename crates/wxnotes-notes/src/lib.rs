//! In-memory calendar notes, one per date.
//!
//! Notes live only for the lifetime of the process.

pub mod note_store;

pub use note_store::{NoteEntry, NoteError, NoteStore, SaveOutcome};
