//! Calendar sync for wxnotes.
//!
//! Pushes saved notes to a remote calendar as one-hour events, authenticating
//! with a service-account key file.

pub mod auth;
pub mod client;
pub mod error;
pub mod sync;
pub mod types;

pub use auth::ServiceAccountKey;
pub use client::CalendarClient;
pub use error::CalendarError;
pub use sync::{CalendarSync, CALENDAR_ID};
pub use types::{event_window, parse_note_date, Event, EventDateTime, EventRequest};
