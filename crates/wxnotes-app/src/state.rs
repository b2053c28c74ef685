use chrono::NaiveDate;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wxnotes_calendar::types::NOTE_DATE_FORMAT;
use wxnotes_notes::NoteStore;

pub const WEATHER_PLACEHOLDER: &str = "Weather info will be shown here";

/// Everything the window holds. Owned by the event loop; handlers borrow it.
#[derive(Debug)]
pub struct AppState {
    /// City text input
    pub city_input: String,
    /// Date picker value, `%m/%d/%y`
    pub selected_date: String,
    /// Note text input
    pub note_input: String,
    /// Weather label
    pub weather_text: String,
    pub notes: NoteStore,
    /// Notes list as last rendered
    pub notes_list: Vec<String>,
    pub(crate) weather_generation: u64,
    pub(crate) weather_inflight: Option<CancellationToken>,
    /// Calendar pushes not yet finished; drained before the loop returns
    pub(crate) pending_syncs: JoinSet<()>,
}

impl AppState {
    /// Fresh window with the date picker on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            city_input: String::new(),
            selected_date: today.format(NOTE_DATE_FORMAT).to_string(),
            note_input: String::new(),
            weather_text: WEATHER_PLACEHOLDER.to_string(),
            notes: NoteStore::new(),
            notes_list: Vec::new(),
            weather_generation: 0,
            weather_inflight: None,
            pending_syncs: JoinSet::new(),
        }
    }

    /// Number of weather lookups started so far.
    pub fn weather_generation(&self) -> u64 {
        self.weather_generation
    }

    pub fn weather_in_flight(&self) -> bool {
        self.weather_inflight.is_some()
    }

    pub fn syncs_in_flight(&self) -> usize {
        self.pending_syncs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = AppState::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        assert_eq!(state.selected_date, "05/01/24");
        assert_eq!(state.weather_text, WEATHER_PLACEHOLDER);
        assert!(state.notes.is_empty());
        assert!(!state.weather_in_flight());
        assert_eq!(state.weather_generation(), 0);
        assert_eq!(state.syncs_in_flight(), 0);
    }
}
