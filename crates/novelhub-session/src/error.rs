//! Error types for session operations.

/// Error type for session operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing the storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The persisted session file could not be parsed or written.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The session changed while an operation was in flight.
    #[error("Session changed during {0}")]
    Superseded(String),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, Error>;
