use sitemill_core::{EntryError, StorageError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WriterError>;

/// Lifecycle violations of a writer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("writer already started")]
    AlreadyStarted,

    #[error("writer not started, call start() first")]
    NotStarted,

    #[error("writer already finished, a new writer is required for another run")]
    AlreadyFinished,
}

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("invalid writer state: {0}")]
    State(#[from] StateError),

    #[error("entry limit ({limit}) reached for index file ({path}); reduce the number of entries")]
    EntryLimitReached { limit: usize, path: String },

    #[error("size limit ({limit}MB) reached for index file ({path}); reduce the number of entries")]
    SizeLimitReached { limit: f64, path: String },

    #[error("could not open stream for path {path}: {reason}")]
    StreamOpen { path: String, reason: String },

    #[error("path {path} does not carry the expected extension .{extension}")]
    PathFormat { path: String, extension: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid source name '{0}': must be non-empty and contain no '/'")]
    InvalidSourceName(String),

    #[error("no source registered with name \"{name}\" (available sources: {available:?})")]
    SourceNotRegistered { name: String, available: Vec<String> },

    #[error("source error: {0}")]
    Source(String),

    #[error("invalid entry: {0}")]
    Entry(#[from] EntryError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl WriterError {
    /// Any store failure while opening a stream is reported as `StreamOpen` for `path`.
    pub(crate) fn from_stream_open(path: &str, err: StorageError) -> Self {
        match err {
            StorageError::StreamOpen { path, reason } => WriterError::StreamOpen { path, reason },
            other => WriterError::StreamOpen {
                path: path.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
