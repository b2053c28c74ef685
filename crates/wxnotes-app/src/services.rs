//! Network-facing services and the messages their tasks send back to the loop.

use wxnotes_calendar::CalendarSync;
use wxnotes_core::{Config, ErrorLog, CREDENTIALS_FILE, ERROR_LOG_FILE};
use wxnotes_weather::WeatherProvider;

/// Results delivered to the event loop by spawned tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// A weather lookup finished; `generation` identifies the request.
    WeatherDone { generation: u64, text: String },
    /// A calendar push finished. Failures were already logged by the task.
    SyncDone { date: String, synced: bool },
}

/// Shared, read-only collaborators of the handlers.
#[derive(Debug, Clone)]
pub struct Services {
    pub weather: WeatherProvider,
    /// `None` when calendar sync is turned off
    pub calendar: Option<CalendarSync>,
    pub error_log: ErrorLog,
}

impl Services {
    pub fn from_config(config: &Config, api_key: String) -> Self {
        let calendar = config.calendar.sync_enabled.then(|| {
            CalendarSync::with_api_base(CREDENTIALS_FILE, config.calendar.api_base.clone())
        });

        Self {
            weather: WeatherProvider::with_base_url(api_key, config.weather.base_url.clone()),
            calendar,
            error_log: ErrorLog::new(ERROR_LOG_FILE),
        }
    }
}

/// Run one weather lookup and turn every outcome into label text.
///
/// Transport and parse failures are written to the error log.
pub async fn lookup_weather(
    provider: &WeatherProvider,
    error_log: &ErrorLog,
    city: &str,
) -> String {
    match provider.fetch(city).await {
        Ok(report) => report.display_text(),
        Err(e) => {
            tracing::error!(city, "Weather lookup failed: {}", e);
            error_log.record(&e.to_string());
            format!("Error fetching weather data: {}", e)
        }
    }
}

/// Push one note to the calendar. Failures are logged and swallowed.
pub async fn sync_note(
    calendar: &CalendarSync,
    error_log: &ErrorLog,
    date: &str,
    note: &str,
) -> bool {
    match calendar.push_note(date, note).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(date, "Calendar sync failed: {}", e);
            error_log.record(&format!("Calendar sync failed for {}: {}", date, e));
            false
        }
    }
}
