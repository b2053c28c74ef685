//! Centralized error types for the wxnotes application.
//!
//! Two classes of failure reach the user:
//! - input errors, shown as a warning and never logged
//! - external-call errors, which the handlers degrade to display text or log lines
//!
//! Startup failures (`ConfigError`) are the only fatal case.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

/// Rejected user input. Surfaced as a modal-style warning; never logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty city name")]
    EmptyCity,

    #[error("empty note")]
    EmptyNote,

    #[error("unrecognised date")]
    InvalidDate,
}

impl InputError {
    /// Warning dialog title.
    pub fn title(&self) -> &'static str {
        "Input Error"
    }

    /// Warning dialog body.
    pub fn message(&self) -> &'static str {
        match self {
            InputError::EmptyCity => "Please enter a city name",
            InputError::EmptyNote => "Please enter a note",
            InputError::InvalidDate => "Please select a date as mm/dd/yy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_dialog_text() {
        assert_eq!(InputError::EmptyCity.title(), "Input Error");
        assert_eq!(InputError::EmptyCity.message(), "Please enter a city name");
        assert_eq!(InputError::EmptyNote.message(), "Please enter a note");
    }

    #[test]
    fn test_missing_setting_display() {
        let err = ConfigError::MissingSetting("No API key found.".into());
        assert_eq!(err.to_string(), "Missing required setting: No API key found.");
    }
}
