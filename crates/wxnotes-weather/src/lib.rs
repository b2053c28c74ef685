//! Weather lookup for wxnotes
//!
//! Fetches current conditions for a single city from an
//! OpenWeatherMap-compatible HTTP API and renders them as display text.

pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::*;
