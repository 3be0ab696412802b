use std::error::Error;
use thiserror::Error;

/// Result alias for match archive operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by a match archive backend regardless of the underlying
/// database. The archive is best-effort: callers fall back to broadcast-only
/// finalization when it is unreachable.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("match archive unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
