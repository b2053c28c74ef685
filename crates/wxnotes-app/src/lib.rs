//! Application shell for wxnotes: state, handlers and the event loop.
//!
//! Handlers run one at a time on the loop and own all state mutation.
//! Network work is spawned on the same runtime and reports back through
//! `AppMessage`s.

pub mod command;
pub mod event_loop;
pub mod handlers;
pub mod services;
pub mod state;
pub mod surface;
pub mod terminal;

pub use command::{CommandError, UiCommand};
pub use event_loop::run;
pub use services::{AppMessage, Services};
pub use state::AppState;
pub use surface::Surface;
pub use terminal::TerminalSurface;
