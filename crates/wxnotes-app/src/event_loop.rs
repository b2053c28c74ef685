//! Single-threaded dispatch loop.
//!
//! One branch runs at a time: a user command, a refresh tick, or a finished
//! task's message. Only this loop touches `AppState`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::command::UiCommand;
use crate::handlers::{apply_command, apply_message, update_weather, HandlerContext};
use crate::services::Services;
use crate::state::AppState;
use crate::surface::Surface;

/// Drive the application until `Quit`, the command stream closes, or
/// `shutdown` is cancelled. Returns the final state once every pending
/// calendar push has finished.
///
/// The first refresh fires immediately. Each tick reads the city input as it
/// is at that moment.
pub async fn run<S: Surface>(
    mut state: AppState,
    services: Arc<Services>,
    surface: &mut S,
    mut commands: UnboundedReceiver<UiCommand>,
    refresh_every: Duration,
    shutdown: CancellationToken,
) -> AppState {
    let (tx, mut messages) = mpsc::unbounded_channel();
    let ctx = HandlerContext {
        services: &services,
        messages: &tx,
        shutdown: &shutdown,
    };

    let mut refresh = tokio::time::interval(refresh_every);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(refresh_secs = refresh_every.as_secs(), "Event loop started");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Shutdown requested");
                break;
            }
            _ = refresh.tick() => {
                tracing::debug!("Periodic weather refresh");
                let _ = update_weather(&mut state, &ctx, &mut *surface);
            }
            command = commands.recv() => match command {
                Some(command) => {
                    if apply_command(&mut state, &ctx, &mut *surface, command).is_break() {
                        break;
                    }
                }
                None => {
                    tracing::info!("Input closed");
                    break;
                }
            },
            Some(message) = messages.recv() => {
                apply_message(&mut state, &mut *surface, message);
            }
        }
    }

    // Stops any in-flight weather lookup.
    shutdown.cancel();

    if !state.pending_syncs.is_empty() {
        tracing::info!(
            pending = state.pending_syncs.len(),
            "Waiting for calendar sync to finish"
        );
    }
    while let Some(result) = state.pending_syncs.join_next().await {
        if let Err(e) = result {
            tracing::error!("Calendar sync task failed: {}", e);
            services
                .error_log
                .record(&format!("Calendar sync task failed: {}", e));
        }
    }

    state
}
