use portal_core::StorageError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StatsError {
    #[error("caller is not authorized to read stats")]
    Unauthorized,
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for StatsError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(code) => Self::NotFound(code),
            other => Self::Storage(other.to_string()),
        }
    }
}
