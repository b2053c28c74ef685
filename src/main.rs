use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wxnotes_app::terminal::spawn_stdin_reader;
use wxnotes_app::{run, AppState, Services, TerminalSurface};
use wxnotes_core::Config;

const WINDOW_TITLE: &str = "Weather and Calendar Notes";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize core
    wxnotes_core::init()?;

    let (config, _validation) = Config::load_validated()?;

    // Without a key nothing can be shown; fail before the window opens.
    let api_key = Config::weather_api_key()?;

    let services = Arc::new(Services::from_config(&config, api_key));
    tracing::info!(
        sync_enabled = services.calendar.is_some(),
        refresh_minutes = config.weather.refresh_minutes,
        config_dir = %config.config_dir.display(),
        "wxnotes started"
    );

    let mut surface = TerminalSurface::new(WINDOW_TITLE);
    surface.show_banner();

    let (tx, commands) = mpsc::unbounded_channel();
    let reader = spawn_stdin_reader(tx);

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let state = AppState::new(chrono::Local::now().date_naive());
    let state = run(
        state,
        services,
        &mut surface,
        commands,
        config.weather.refresh_interval(),
        shutdown,
    )
    .await;

    reader.abort();
    tracing::info!(notes = state.notes.len(), "wxnotes stopped");

    Ok(())
}
