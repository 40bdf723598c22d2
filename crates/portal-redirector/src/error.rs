use portal_core::StorageError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RedirectError {
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short code expired: {0}")]
    Expired(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for RedirectError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(code) => Self::NotFound(code),
            other => Self::Storage(other.to_string()),
        }
    }
}
