//! User actions, as parsed from a line of terminal input.

use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  city <name>       set the city
  weather           look up weather for the city
  date <mm/dd/yy>   select a calendar date
  note <text>       set the note text
  save              save the note for the selected date
  notes             show saved notes
  help              show this help
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetCity(String),
    GetWeather,
    SelectDate(String),
    SetNote(String),
    SaveNote,
    ShowNotes,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

impl UiCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    /// `CommandError::Unknown` for an unrecognised verb,
    /// `CommandError::MissingArgument` for `date` without a value.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "city" => Self::SetCity(rest.to_string()),
            "weather" => Self::GetWeather,
            "date" if rest.is_empty() => return Err(CommandError::MissingArgument("date")),
            "date" => Self::SelectDate(rest.to_string()),
            "note" => Self::SetNote(rest.to_string()),
            "save" => Self::SaveNote,
            "notes" => Self::ShowNotes,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_arguments() {
        assert_eq!(
            UiCommand::parse("city  New York "),
            Ok(Some(UiCommand::SetCity("New York".into())))
        );
        assert_eq!(
            UiCommand::parse("note Pick up   groceries"),
            Ok(Some(UiCommand::SetNote("Pick up   groceries".into())))
        );
        assert_eq!(
            UiCommand::parse("date 05/01/24"),
            Ok(Some(UiCommand::SelectDate("05/01/24".into())))
        );
    }

    #[test]
    fn test_parse_clears_inputs() {
        assert_eq!(UiCommand::parse("city"), Ok(Some(UiCommand::SetCity(String::new()))));
        assert_eq!(UiCommand::parse("note"), Ok(Some(UiCommand::SetNote(String::new()))));
    }

    #[test]
    fn test_parse_bare_verbs() {
        assert_eq!(UiCommand::parse("weather"), Ok(Some(UiCommand::GetWeather)));
        assert_eq!(UiCommand::parse("SAVE"), Ok(Some(UiCommand::SaveNote)));
        assert_eq!(UiCommand::parse("notes"), Ok(Some(UiCommand::ShowNotes)));
        assert_eq!(UiCommand::parse("?"), Ok(Some(UiCommand::Help)));
        assert_eq!(UiCommand::parse("exit"), Ok(Some(UiCommand::Quit)));
    }

    #[test]
    fn test_parse_blank_and_errors() {
        assert_eq!(UiCommand::parse("   "), Ok(None));
        assert_eq!(UiCommand::parse("date"), Err(CommandError::MissingArgument("date")));
        assert_eq!(
            UiCommand::parse("fly away"),
            Err(CommandError::Unknown("fly".into()))
        );
    }
}
