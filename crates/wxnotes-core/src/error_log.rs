//! Append-only diagnostic error log.
//!
//! Each line is `<local timestamp>: <error text>`. No rotation, no size bound.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, error_text: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        writeln!(file, "{}", format_line(&timestamp, error_text))
    }

    /// Append, reporting a failed write through tracing instead of the caller.
    pub fn record(&self, error_text: &str) {
        if let Err(e) = self.append(error_text) {
            tracing::warn!(path = %self.path.display(), "Failed to write error log: {}", e);
        }
    }
}

fn format_line(timestamp: &str, error_text: &str) -> String {
    format!("{}: {}", timestamp, error_text)
}
