//! Calendar API types and the note → event mapping.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Date picker output format: two-digit month/day/year.
pub const NOTE_DATE_FORMAT: &str = "%m/%d/%y";

/// Fixed body of every synced event.
pub const EVENT_DESCRIPTION: &str = "Calendar Note";

const EVENT_TIME_ZONE: &str = "UTC";
const EVENT_START_HOUR: i64 = 9;
const EVENT_LENGTH_HOURS: i64 = 1;

/// Parse a date picker value such as `05/01/24`.
///
/// # Errors
/// Returns `CalendarError::InvalidDate` when the text does not match `%m/%d/%y`.
pub fn parse_note_date(text: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(text.trim(), NOTE_DATE_FORMAT)
        .map_err(|e| CalendarError::InvalidDate(format!("{:?}: {}", text, e)))
}

/// 09:00–10:00 UTC on `date`.
pub fn event_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = (date.and_time(NaiveTime::MIN) + Duration::hours(EVENT_START_HOUR)).and_utc();
    let end = start + Duration::hours(EVENT_LENGTH_HOURS);
    (start, end)
}

/// Request body for the event-insert call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRequest {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

impl From<DateTime<Utc>> for EventDateTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            date_time: dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            time_zone: EVENT_TIME_ZONE.to_string(),
        }
    }
}

impl EventRequest {
    /// Build the event for a saved note.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` when `date` is not `%m/%d/%y`.
    pub fn for_note(date: &str, note: &str) -> Result<Self, CalendarError> {
        let (start, end) = event_window(parse_note_date(date)?);
        Ok(Self {
            summary: note.to_string(),
            description: EVENT_DESCRIPTION.to_string(),
            start: start.into(),
            end: end.into(),
        })
    }
}

// API Response Types

/// Event as returned by the insert call. Only what gets logged is kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub html_link: Option<String>,
}
