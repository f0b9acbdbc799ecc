use thiserror::Error;
use warren_core::StoreError;

pub type Result<T> = std::result::Result<T, RedirectorError>;

#[derive(Debug, Error)]
pub enum RedirectorError {
    /// The store could not answer (I/O failure, timeout). Transient.
    #[error("storage read failed: {0}")]
    StorageReadFailed(#[source] StoreError),
    /// The stored payload could not be decoded. Not retryable.
    #[error("stored record is corrupted: {0}")]
    StorageCorrupted(String),
}
