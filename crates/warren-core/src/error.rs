use thiserror::Error;

/// Result type for record store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by a [`RecordStore`][crate::store::RecordStore] backend.
///
/// `NotFound` is the only variant that means "no such key". Everything else
/// is a failure of the backend itself and must not be read as a miss.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("key not found")]
    NotFound,
    #[error("key already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Errors raised while encoding or decoding a stored [`UrlRecord`][crate::UrlRecord].
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode url record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode url record: {0}")]
    Decode(#[source] serde_json::Error),
}
