use thiserror::Error;

/// Validation failures raised while constructing entry value objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntryError {
    #[error("invalid location '{value}': {reason}")]
    InvalidLocation { value: String, reason: String },

    #[error("invalid change frequency '{0}', expected one of: always, hourly, daily, weekly, monthly, yearly, never")]
    InvalidChangeFrequency(String),

    #[error("invalid priority {0}, expected a value between 0.0 and 1.0")]
    InvalidPriority(f64),

    #[error("invalid last modified date: {0}")]
    InvalidLastModified(String),
}

/// Errors reported by staging store providers.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("object already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    #[error("could not open stream for path {path}: {reason}")]
    StreamOpen { path: String, reason: String },

    #[error("stream already closed for path {0}")]
    StreamClosed(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}
