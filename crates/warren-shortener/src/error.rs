use thiserror::Error;
use warren_core::{CodecError, StoreError};

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Error)]
pub enum ShortenerError {
    /// The request is malformed; retrying it unchanged will not help.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Every candidate code collided with an existing record.
    #[error("could not allocate a free short code after {attempts} attempts")]
    CodeAllocationFailed { attempts: u32 },
    /// The record store rejected or failed the write.
    #[error("storage write failed: {0}")]
    StorageWriteFailed(#[source] StoreError),
    #[error("failed to encode record: {0}")]
    Encoding(#[from] CodecError),
}

impl ShortenerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
