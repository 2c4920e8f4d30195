use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong during one watch run.
///
/// Notification failures are the only non-fatal kind: a report that could not
/// be delivered must not look like a scrape that could not be done.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timed out after {timeout_secs}s waiting for selector `{selector}`")]
    SelectorTimeout { selector: String, timeout_secs: u64 },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Store error at {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WatchError {
    pub fn persistence(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        WatchError::Persistence {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error must abort the run with a non-zero exit status.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WatchError::Notification(_))
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
