//! Calendar-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Token expired")]
    TokenExpired,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
