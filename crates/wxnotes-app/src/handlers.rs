//! UI action handlers.
//!
//! Each handler validates input, mutates `AppState`, and spawns any network
//! work onto the runtime. Results come back as `AppMessage`s and are applied
//! by `apply_message` on the loop.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use wxnotes_calendar::parse_note_date;
use wxnotes_calendar::types::NOTE_DATE_FORMAT;
use wxnotes_core::InputError;
use wxnotes_notes::{NoteError, SaveOutcome};

use crate::command::UiCommand;
use crate::services::{lookup_weather, sync_note, AppMessage, Services};
use crate::state::AppState;
use crate::surface::Surface;

/// Everything a handler needs besides the state and the surface.
pub struct HandlerContext<'a> {
    pub services: &'a Arc<Services>,
    pub messages: &'a UnboundedSender<AppMessage>,
    /// Root token; cancelled on shutdown.
    pub shutdown: &'a CancellationToken,
}

fn reject(surface: &mut dyn Surface, error: InputError) -> InputError {
    surface.warn(error.title(), error.message());
    error
}

/// "Get Weather": look up the city currently in the input field.
///
/// Cancels any lookup still in flight, so only the newest result is applied.
///
/// # Errors
/// `InputError::EmptyCity` when the field is empty; no request is made.
pub fn update_weather(
    state: &mut AppState,
    ctx: &HandlerContext<'_>,
    surface: &mut dyn Surface,
) -> Result<(), InputError> {
    let city = state.city_input.clone();
    if city.is_empty() {
        return Err(reject(surface, InputError::EmptyCity));
    }

    if let Some(previous) = state.weather_inflight.take() {
        tracing::debug!(
            generation = state.weather_generation,
            "Cancelling superseded weather lookup"
        );
        previous.cancel();
    }

    state.weather_generation += 1;
    let generation = state.weather_generation;
    let token = ctx.shutdown.child_token();
    state.weather_inflight = Some(token.clone());

    let services = Arc::clone(ctx.services);
    let tx = ctx.messages.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!(generation, "Weather lookup cancelled");
            }
            text = lookup_weather(&services.weather, &services.error_log, &city) => {
                let _ = tx.send(AppMessage::WeatherDone { generation, text });
            }
        }
    });

    Ok(())
}

/// "Save Note": store the note for the selected date, redraw the list, and
/// push it to the calendar when sync is enabled.
///
/// The local save stands regardless of what the sync does. Sync tasks are
/// not cancelled at shutdown; the loop waits for them before returning.
///
/// # Errors
/// `InputError::EmptyNote` when the note field is empty; the store is untouched.
pub fn save_note(
    state: &mut AppState,
    ctx: &HandlerContext<'_>,
    surface: &mut dyn Surface,
) -> Result<SaveOutcome, InputError> {
    let date = state.selected_date.clone();
    let note = state.note_input.clone();

    let outcome = match state.notes.save(&date, &note) {
        Ok(outcome) => outcome,
        Err(NoteError::EmptyNote) => return Err(reject(surface, InputError::EmptyNote)),
    };

    state.notes_list = state.notes.display_lines();
    surface.show_notes(&state.notes_list);

    if let Some(calendar) = ctx.services.calendar.clone() {
        // Reap pushes that already finished.
        while state.pending_syncs.try_join_next().is_some() {}

        let services = Arc::clone(ctx.services);
        let tx = ctx.messages.clone();
        state.pending_syncs.spawn(async move {
            let synced = sync_note(&calendar, &services.error_log, &date, &note).await;
            let _ = tx.send(AppMessage::SyncDone { date, synced });
        });
    }

    Ok(outcome)
}

/// Move the date picker. Dates are normalised to `%m/%d/%y`.
///
/// # Errors
/// `InputError::InvalidDate` when the text is not a `mm/dd/yy` date.
pub fn select_date(
    state: &mut AppState,
    surface: &mut dyn Surface,
    text: &str,
) -> Result<(), InputError> {
    let date = parse_note_date(text).map_err(|_| reject(surface, InputError::InvalidDate))?;
    state.selected_date = date.format(NOTE_DATE_FORMAT).to_string();
    Ok(())
}

/// Apply a finished task's result to the state.
pub fn apply_message(state: &mut AppState, surface: &mut dyn Surface, message: AppMessage) {
    match message {
        AppMessage::WeatherDone { generation, text } => {
            if generation != state.weather_generation {
                tracing::debug!(generation, "Dropping stale weather result");
                return;
            }
            state.weather_inflight = None;
            surface.show_weather(&text);
            state.weather_text = text;
        }
        AppMessage::SyncDone { date, synced } => {
            tracing::debug!(date = %date, synced, "Calendar sync finished");
        }
    }
}

/// Dispatch one user action. `Break` means the window was closed.
pub fn apply_command(
    state: &mut AppState,
    ctx: &HandlerContext<'_>,
    surface: &mut dyn Surface,
    command: UiCommand,
) -> ControlFlow<()> {
    // Input errors have already been shown by the handler.
    match command {
        UiCommand::SetCity(city) => state.city_input = city,
        UiCommand::GetWeather => {
            let _ = update_weather(state, ctx, surface);
        }
        UiCommand::SelectDate(text) => {
            let _ = select_date(state, surface, &text);
        }
        UiCommand::SetNote(note) => state.note_input = note,
        UiCommand::SaveNote => {
            let _ = save_note(state, ctx, surface);
        }
        UiCommand::ShowNotes => surface.show_notes(&state.notes_list),
        UiCommand::Help => surface.show_help(),
        UiCommand::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}
