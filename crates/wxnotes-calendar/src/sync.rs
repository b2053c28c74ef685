//! One-way push of a saved note to the remote calendar.

use std::path::PathBuf;

use tracing::instrument;

use crate::auth::ServiceAccountKey;
use crate::client::CalendarClient;
use crate::error::CalendarError;
use crate::types::{Event, EventRequest};

/// The single calendar every note is pushed to.
pub const CALENDAR_ID: &str = "primary";

#[derive(Debug, Clone)]
pub struct CalendarSync {
    http: reqwest::Client,
    credentials_path: PathBuf,
    api_base: String,
}

impl CalendarSync {
    /// `api_base` is the calendar REST root, e.g. `https://www.googleapis.com/calendar/v3`.
    pub fn with_api_base(
        credentials_path: impl Into<PathBuf>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials_path: credentials_path.into(),
            api_base: api_base.into(),
        }
    }

    /// Create a 09:00–10:00 UTC event for the note on `date` (`%m/%d/%y`).
    ///
    /// Credentials are read from disk on every call.
    ///
    /// # Errors
    /// Any failure along the way: bad date, unreadable credentials, token
    /// exchange, transport, or API rejection.
    #[instrument(skip(self, note), level = "info")]
    pub async fn push_note(&self, date: &str, note: &str) -> Result<Event, CalendarError> {
        let request = EventRequest::for_note(date, note)?;

        let key = ServiceAccountKey::load(&self.credentials_path)?;
        let access_token = key.fetch_access_token(&self.http).await?;

        let client = CalendarClient::new_with_base_url(&access_token, &self.api_base);
        let event = client.insert_event(CALENDAR_ID, &request).await?;

        tracing::info!(
            event_id = %event.id,
            "Event created: {}",
            event.html_link.as_deref().unwrap_or("<no link>")
        );
        Ok(event)
    }
}
