use std::path::PathBuf;
use thiserror::Error;

use crate::models::SendableError;

pub type Result<T> = std::result::Result<T, FetchLogsError>;

#[derive(Error, Debug)]
pub enum FetchLogsError {
    #[error("Invalid start time '{input}' (expected DD/MM/YY HH:MM:SS): {reason}")]
    Parse { input: String, reason: String },

    #[error("Invalid duration: {0} minute(s)")]
    InvalidDuration(i64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch events from log group '{log_group}': {source}")]
    Fetch {
        log_group: String,
        #[source]
        source: SendableError,
    },

    #[error("Pagination limit exceeded: service still had more results after {pages} page(s)")]
    PaginationLimitExceeded { pages: usize },

    #[error("Failed to serialize log event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger setup failed: {0}")]
    Logger(String),
}
